//! Docusaurus project staging and site building for Docus.
//!
//! [`DocusBuilder`] drives a build in two phases:
//!
//! 1. **sync**: stage every document of the chapter tree into the scaffold
//!    cache and regenerate `sidebars.json`, `siteConf.json`, `siteConfig.js`
//!    and the landing page;
//! 2. **make**: export the synced project or run the site build tool, then
//!    publish the result next to the project via temp-then-rename.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docus_build::{BuildConfig, DocusBuilder};
//! use docus_cache::ShellRunner;
//!
//! let mut builder = DocusBuilder::new(config, Arc::new(ShellRunner));
//! let site = builder.make("site")?;
//! println!("Site built in {}", site.display());
//! ```

mod builder;
mod config;
mod error;
mod fs_util;
mod template;

pub use builder::{
    BUILD_OUTPUT_DIR, BuildState, DocusBuilder, INDEX_PAGE, PAGES_DIR, SIDEBARS_FILE,
    SITE_CONF_FILE, SITE_CONFIG_FILE, SyncReport, Target,
};
pub use config::BuildConfig;
pub use error::{BuildError, MakeError};
