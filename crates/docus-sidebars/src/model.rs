//! Sidebar object graph and its JSON form.
//!
//! The JSON form is what Docusaurus reads from `website/sidebars.json`:
//!
//! ```text
//! {
//!   "sb1": {
//!     "Intro": ["index", "install"],
//!     "Guide": ["guide/a", {"type": "subcategory", "label": "More", "ids": ["guide/b"]}]
//!   }
//! }
//! ```

use serde_json::{Map, Value, json};

/// A single document reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    path: String,
}

impl Document {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Document path relative to the docs root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn as_obj(&self) -> Value {
        Value::String(self.path.clone())
    }
}

/// Labeled group of documents nested one level below a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubCategory {
    label: String,
    items: Vec<Document>,
}

impl SubCategory {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: Document) {
        self.items.push(item);
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn items(&self) -> &[Document] {
        &self.items
    }

    #[must_use]
    pub fn as_obj(&self) -> Value {
        json!({
            "type": "subcategory",
            "label": self.label,
            "ids": self.items.iter().map(Document::as_obj).collect::<Vec<_>>(),
        })
    }
}

/// Entry of a [`Category`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryItem {
    Document(Document),
    SubCategory(SubCategory),
}

impl CategoryItem {
    #[must_use]
    pub fn as_obj(&self) -> Value {
        match self {
            Self::Document(doc) => doc.as_obj(),
            Self::SubCategory(sub) => sub.as_obj(),
        }
    }
}

impl From<Document> for CategoryItem {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

impl From<SubCategory> for CategoryItem {
    fn from(sub: SubCategory) -> Self {
        Self::SubCategory(sub)
    }
}

/// Labeled top-level group of a sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    label: String,
    items: Vec<CategoryItem>,
}

impl Category {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: impl Into<CategoryItem>) {
        self.items.push(item.into());
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn items(&self) -> &[CategoryItem] {
        &self.items
    }

    /// Serialize as `{label: [item, ...]}`.
    #[must_use]
    pub fn as_obj(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(
            self.label.clone(),
            Value::Array(self.items.iter().map(CategoryItem::as_obj).collect()),
        );
        Value::Object(obj)
    }
}

/// One navigation sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideBar {
    name: String,
    categories: Vec<Category>,
}

impl SideBar {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Sidebar name. Not part of the JSON form, which uses positional keys.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Merge every category into one object.
    ///
    /// Categories are inserted in order; a later category whose label
    /// collides with an earlier one replaces its items but keeps the
    /// earlier key position.
    #[must_use]
    pub fn as_obj(&self) -> Value {
        let mut obj = Map::new();
        for category in &self.categories {
            obj.insert(
                category.label.clone(),
                Value::Array(category.items.iter().map(CategoryItem::as_obj).collect()),
            );
        }
        Value::Object(obj)
    }
}

/// Ordered collection of sidebars.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SideBarSet {
    sidebars: Vec<SideBar>,
}

impl SideBarSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sidebar(&mut self, sidebar: SideBar) {
        self.sidebars.push(sidebar);
    }

    #[must_use]
    pub fn sidebars(&self) -> &[SideBar] {
        &self.sidebars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Serialize as `{"sb1": ..., "sb2": ...}` in insertion order.
    #[must_use]
    pub fn as_obj(&self) -> Value {
        let obj: Map<String, Value> = self
            .sidebars
            .iter()
            .enumerate()
            .map(|(i, sidebar)| (format!("sb{}", i + 1), sidebar.as_obj()))
            .collect();
        Value::Object(obj)
    }

    /// Pretty-printed JSON for `sidebars.json`.
    #[must_use]
    pub fn to_json(&self) -> String {
        format!("{:#}", self.as_obj())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_as_obj() {
        assert_eq!(Document::new("guide/a").as_obj(), json!("guide/a"));
    }

    #[test]
    fn test_subcategory_as_obj() {
        let mut sub = SubCategory::new("More");
        sub.add_item(Document::new("b"));
        sub.add_item(Document::new("c"));
        assert_eq!(
            sub.as_obj(),
            json!({"type": "subcategory", "label": "More", "ids": ["b", "c"]})
        );
    }

    #[test]
    fn test_sidebar_merges_categories() {
        let mut intro = Category::new("Intro");
        intro.add_item(Document::new("a"));
        let mut guide = Category::new("Guide");
        guide.add_item(Document::new("b"));
        let mut sidebar = SideBar::new("main");
        sidebar.add_category(intro);
        sidebar.add_category(guide);

        assert_eq!(sidebar.as_obj(), json!({"Intro": ["a"], "Guide": ["b"]}));
    }

    #[test]
    fn test_sidebar_colliding_category_overwrites() {
        let mut first = Category::new("Same");
        first.add_item(Document::new("a"));
        let mut other = Category::new("Other");
        other.add_item(Document::new("o"));
        let mut second = Category::new("Same");
        second.add_item(Document::new("b"));
        let mut sidebar = SideBar::new("main");
        sidebar.add_category(first);
        sidebar.add_category(other);
        sidebar.add_category(second);

        let obj = sidebar.as_obj();
        assert_eq!(obj, json!({"Same": ["b"], "Other": ["o"]}));
        let keys: Vec<&String> = obj.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["Same", "Other"]);
    }

    #[test]
    fn test_sidebar_set_positional_keys() {
        let mut set = SideBarSet::new();
        set.add_sidebar(SideBar::new("zeta"));
        set.add_sidebar(SideBar::new("alpha"));
        set.add_sidebar(SideBar::new("mid"));

        let obj = set.as_obj();
        let keys: Vec<&String> = obj.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["sb1", "sb2", "sb3"]);
    }

    #[test]
    fn test_sidebar_set_to_json_is_deterministic() {
        let mut category = Category::new("Docs");
        category.add_item(Document::new("index"));
        let mut sub = SubCategory::new("Deep");
        sub.add_item(Document::new("deep/one"));
        category.add_item(sub);
        let mut sidebar = SideBar::new("main");
        sidebar.add_category(category);
        let mut set = SideBarSet::new();
        set.add_sidebar(sidebar);

        let first = set.to_json();
        let second = set.clone().to_json();
        assert_eq!(first, second);

        let parsed: Value = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed, set.as_obj());
    }

    #[test]
    fn test_empty_sidebar_set() {
        let set = SideBarSet::new();
        assert!(set.is_empty());
        assert_eq!(set.to_json(), "{}");
    }
}
