//! Scaffold cache management for Docus.
//!
//! Two pieces live here:
//!
//! - [`ScaffoldCache`]: the persistent working directory holding a generated
//!   Docusaurus project, created once by an external scaffolding tool;
//! - [`ToolRunner`]: the seam through which external tools are run, with
//!   [`ShellRunner`] for real builds and [`RecordingRunner`] for tests
//!   (behind the `mock` feature).
//!
//! # Example
//!
//! ```no_run
//! use docus_cache::{ScaffoldCache, ShellRunner};
//!
//! let cache = ScaffoldCache::new(".cache");
//! cache.ensure(&ShellRunner, "docusaurus-init")?;
//! # Ok::<(), docus_cache::CacheError>(())
//! ```

#[cfg(any(test, feature = "mock"))]
mod mock;
mod scaffold;
mod tool;

#[cfg(any(test, feature = "mock"))]
pub use mock::{RecordingRunner, ToolCall};
pub use scaffold::{CacheError, CacheStatus, DOCS_DIR, ScaffoldCache, WEBSITE_DIR};
pub use tool::{ShellRunner, ToolError, ToolOutput, ToolRunner};
