//! Chapter tree model for Docus.
//!
//! A project lists its documents as a recursive "chapter" structure. Each node
//! is one of:
//!
//! - a **leaf**: a path to a source document, relative to the source directory;
//! - a **sequence**: an ordered, unlabeled group of chapters;
//! - a **mapping**: an ordered group of labeled chapters with unique labels.
//!
//! The shape is resolved once, when the configuration is deserialized, into
//! the [`Chapter`] tagged union. Everything downstream (staging, sidebar
//! generation) works on that type and never inspects raw values again.
//!
//! # Example
//!
//! ```
//! use docus_chapters::{Chapter, flatten};
//!
//! let chapters = Chapter::Sequence(vec![
//!     Chapter::leaf("index.md"),
//!     Chapter::Mapping(vec![(
//!         "Guide".to_owned(),
//!         Chapter::Sequence(vec![Chapter::leaf("guide/a.md"), Chapter::leaf("guide/b.md")]),
//!     )]),
//! ]);
//!
//! assert_eq!(flatten(&chapters), ["index.md", "guide/a.md", "guide/b.md"]);
//! ```

mod serde_impl;

use std::path::{Path, PathBuf};
use std::slice;

/// A node of the chapter tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chapter {
    /// Relative path of a source document.
    Leaf(String),
    /// Unlabeled, ordered group.
    Sequence(Vec<Chapter>),
    /// Labeled, ordered group. Labels are unique within one mapping.
    Mapping(Vec<(String, Chapter)>),
}

impl Default for Chapter {
    fn default() -> Self {
        Self::Sequence(Vec::new())
    }
}

impl Chapter {
    /// Create a leaf chapter.
    #[must_use]
    pub fn leaf(path: impl Into<String>) -> Self {
        Self::Leaf(path.into())
    }

    /// Whether this node groups other chapters.
    #[must_use]
    pub fn is_grouping(&self) -> bool {
        !matches!(self, Self::Leaf(_))
    }

    /// Lazily iterate over all document paths in tree order.
    ///
    /// Sequences are visited in order, mappings in insertion order with their
    /// labels discarded.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![Frame::Sequence(slice::from_ref(self).iter())],
        }
    }

    /// Collect all document paths in tree order.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        self.leaves().map(str::to_owned).collect()
    }

    /// Lazily iterate over `root/leaf` for every leaf, in tree order.
    ///
    /// The iterator is `Clone`, so it can be restarted; nothing is cached.
    #[must_use]
    pub fn paths<'a>(&'a self, root: &'a Path) -> Paths<'a> {
        Paths {
            leaves: self.leaves(),
            root,
        }
    }

    /// Ordered `(label, value)` view of a labeled grouping.
    ///
    /// Two shapes count as labeled:
    ///
    /// - a mapping: its entries, in insertion order;
    /// - a non-empty sequence in which every element is a single-entry mapping
    ///   (the "list of one-key tables" form).
    ///
    /// Returns `None` for leaves and for every other sequence.
    #[must_use]
    pub fn labeled_entries(&self) -> Option<Vec<(&str, &Chapter)>> {
        match self {
            Self::Leaf(_) => None,
            Self::Mapping(entries) => Some(
                entries
                    .iter()
                    .map(|(label, value)| (label.as_str(), value))
                    .collect(),
            ),
            Self::Sequence(items) if items.is_empty() => None,
            Self::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Self::Mapping(entries) if entries.len() == 1 => {
                        let (label, value) = &entries[0];
                        Some((label.as_str(), value))
                    }
                    _ => None,
                })
                .collect(),
        }
    }
}

/// Flatten a chapter tree into the ordered list of document paths.
#[must_use]
pub fn flatten(chapter: &Chapter) -> Vec<String> {
    chapter.flatten()
}

#[derive(Clone, Debug)]
enum Frame<'a> {
    Sequence(slice::Iter<'a, Chapter>),
    Mapping(slice::Iter<'a, (String, Chapter)>),
}

/// Iterator over the leaves of a chapter tree, see [`Chapter::leaves`].
///
/// Traversal uses an explicit stack, so nesting depth is not limited by the
/// thread stack.
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let next = match self.stack.last_mut()? {
                Frame::Sequence(iter) => iter.next(),
                Frame::Mapping(iter) => iter.next().map(|(_, value)| value),
            };
            let Some(chapter) = next else {
                self.stack.pop();
                continue;
            };
            match chapter {
                Chapter::Leaf(path) => return Some(path.as_str()),
                Chapter::Sequence(items) => self.stack.push(Frame::Sequence(items.iter())),
                Chapter::Mapping(entries) => self.stack.push(Frame::Mapping(entries.iter())),
            }
        }
    }
}

/// Iterator over `root/leaf` paths, see [`Chapter::paths`].
#[derive(Clone, Debug)]
pub struct Paths<'a> {
    leaves: Leaves<'a>,
    root: &'a Path,
}

impl Iterator for Paths<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        self.leaves.next().map(|leaf| self.root.join(leaf))
    }
}
