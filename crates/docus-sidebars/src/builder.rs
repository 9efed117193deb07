//! Chapter tree to sidebar normalization.
//!
//! Detection rules, applied to a [`Chapter`]:
//!
//! - **Labeled grouping**: a mapping, or a non-empty list whose every element
//!   is a single-entry mapping (see [`Chapter::labeled_entries`]).
//! - **Multi-sidebar form**: the top level is a labeled grouping and every one
//!   of its values is itself a labeled grouping. Each label names a sidebar.
//!   Anything else at the top level is one implicit sidebar named after the
//!   project title.
//! - **Multi-category form**: a sidebar value that is a labeled grouping. Each
//!   label names a category. A plain list is one implicit category named
//!   after the sidebar.
//! - **Category items**: a string is a document, a mapping entry is a
//!   subcategory whose documents are the flattened leaves of its value, and a
//!   nested unlabeled list contributes its flattened leaves as documents.

use docus_chapters::Chapter;

use crate::model::{Category, Document, SideBar, SideBarSet, SubCategory};

/// Label path of the chapter tree root, used in error messages.
const ROOT_PATH: &str = "chapters";

/// Error returned when the chapter tree has the wrong shape for a sidebar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid chapters at `{path}`: {message}")]
pub struct SidebarError {
    /// Dotted label path of the offending node (e.g. `chapters.Guide`).
    pub path: String,
    /// What was wrong with it.
    pub message: String,
}

impl SidebarError {
    fn grouping_required(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            message: "expected a list or a table of chapters, found a document path".to_owned(),
        }
    }
}

/// Build the complete sidebar set for a project.
///
/// # Errors
///
/// Returns [`SidebarError`] if the top level or any category is a bare
/// document path.
pub fn build_sidebar_set(title: &str, chapters: &Chapter) -> Result<SideBarSet, SidebarError> {
    if !chapters.is_grouping() {
        return Err(SidebarError::grouping_required(ROOT_PATH));
    }

    let mut sidebars = SideBarSet::new();
    if let Some(entries) = multi_sidebar_entries(chapters) {
        for (name, value) in entries {
            let path = child_path(ROOT_PATH, name);
            sidebars.add_sidebar(sidebar_at(name, value, &path)?);
        }
    } else {
        sidebars.add_sidebar(sidebar_at(title, chapters, ROOT_PATH)?);
    }
    Ok(sidebars)
}

/// Build one sidebar named `name`.
///
/// # Errors
///
/// Returns [`SidebarError`] if `chapters` or one of its categories is a bare
/// document path.
pub fn build_sidebar(name: &str, chapters: &Chapter) -> Result<SideBar, SidebarError> {
    sidebar_at(name, chapters, name)
}

/// Append the items described by `items` to `category`.
///
/// # Errors
///
/// Returns [`SidebarError`] if `items` is a bare document path.
pub fn fillup_category(category: &mut Category, items: &Chapter) -> Result<(), SidebarError> {
    let path = category.label().to_owned();
    fill_category(category, items, &path)
}

fn multi_sidebar_entries(chapters: &Chapter) -> Option<Vec<(&str, &Chapter)>> {
    let entries = chapters.labeled_entries()?;
    entries
        .iter()
        .all(|(_, value)| value.labeled_entries().is_some())
        .then_some(entries)
}

fn sidebar_at(name: &str, chapters: &Chapter, path: &str) -> Result<SideBar, SidebarError> {
    let mut sidebar = SideBar::new(name);

    if let Some(entries) = chapters.labeled_entries() {
        for (label, items) in entries {
            let mut category = Category::new(label);
            fill_category(&mut category, items, &child_path(path, label))?;
            sidebar.add_category(category);
        }
    } else if let Chapter::Sequence(_) = chapters {
        let mut category = Category::new(name);
        fill_category(&mut category, chapters, path)?;
        sidebar.add_category(category);
    } else {
        return Err(SidebarError::grouping_required(path));
    }

    Ok(sidebar)
}

fn fill_category(category: &mut Category, items: &Chapter, path: &str) -> Result<(), SidebarError> {
    match items {
        Chapter::Leaf(_) => return Err(SidebarError::grouping_required(path)),
        Chapter::Mapping(entries) => {
            for (label, value) in entries {
                category.add_item(subcategory(label, value));
            }
        }
        Chapter::Sequence(children) => {
            for child in children {
                match child {
                    Chapter::Leaf(doc) => category.add_item(Document::new(doc.as_str())),
                    Chapter::Mapping(entries) => {
                        for (label, value) in entries {
                            category.add_item(subcategory(label, value));
                        }
                    }
                    Chapter::Sequence(_) => {
                        for doc in child.leaves() {
                            category.add_item(Document::new(doc));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn subcategory(label: &str, value: &Chapter) -> SubCategory {
    let mut sub = SubCategory::new(label);
    for doc in value.leaves() {
        sub.add_item(Document::new(doc));
    }
    sub
}

fn child_path(parent: &str, label: &str) -> String {
    format!("{parent}.{label}")
}
