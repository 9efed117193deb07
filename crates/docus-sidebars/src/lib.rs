//! Docusaurus sidebar manifest generation for Docus.
//!
//! Normalizes a [`Chapter`](docus_chapters::Chapter) tree into a three-level
//! navigation hierarchy (sidebar, category, subcategory) and serializes it in
//! the shape Docusaurus expects in `sidebars.json`.
//!
//! # Example
//!
//! ```
//! use docus_chapters::Chapter;
//! use docus_sidebars::build_sidebar_set;
//!
//! let chapters = Chapter::Sequence(vec![Chapter::leaf("index"), Chapter::leaf("usage")]);
//! let sidebars = build_sidebar_set("My Project", &chapters).unwrap();
//!
//! assert_eq!(
//!     sidebars.as_obj(),
//!     serde_json::json!({"sb1": {"My Project": ["index", "usage"]}})
//! );
//! ```

mod builder;
mod model;

pub use builder::{SidebarError, build_sidebar, build_sidebar_set, fillup_category};
pub use model::{Category, CategoryItem, Document, SideBar, SideBarSet, SubCategory};
