//! Build configuration record.

use std::path::PathBuf;

use docus_chapters::Chapter;
use serde_json::{Map, Value};

/// Everything a [`DocusBuilder`](crate::DocusBuilder) needs to run.
///
/// Paths should be absolute; relative paths resolve against the process
/// working directory.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project title: name of the implicit sidebar and the site title.
    pub title: String,
    /// Chapter tree describing documents and navigation.
    pub chapters: Chapter,
    /// Directory the chapter leaves are relative to.
    pub source_dir: PathBuf,
    /// Persistent scaffold cache directory.
    pub cache_dir: PathBuf,
    /// Directory receiving `{slug}.docus` and `{slug}.docus.src`.
    pub output_dir: PathBuf,
    /// Artifact name stem.
    pub slug: String,
    /// Extra keys for `siteConf.json`. A `title` key here is ignored.
    pub site_options: Map<String, Value>,
    /// Command line that scaffolds a new Docusaurus project in the cache.
    pub scaffold_command: String,
    /// Command line that builds the site, run inside `website/`.
    pub build_command: String,
}
