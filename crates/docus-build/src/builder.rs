//! Build orchestration: scaffold cache, project sync and artifact publishing.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use docus_cache::{CacheStatus, ScaffoldCache, ToolRunner};
use docus_sidebars::build_sidebar_set;
use serde_json::{Map, Value};

use crate::config::BuildConfig;
use crate::error::{BuildError, MakeError};
use crate::fs_util;
use crate::template;

/// Sidebar manifest, relative to the website directory.
pub const SIDEBARS_FILE: &str = "sidebars.json";
/// Site options consumed by `siteConfig.js`.
pub const SITE_CONF_FILE: &str = "siteConf.json";
pub const SITE_CONFIG_FILE: &str = "siteConfig.js";
pub const PAGES_DIR: &str = "pages";
/// Landing page redirecting to the first document.
pub const INDEX_PAGE: &str = "static/index.html";
/// Where the build tool writes the generated site.
pub const BUILD_OUTPUT_DIR: &str = "build";

const INDEX_DOC_ID: &str = "index";

/// Artifact produced by [`DocusBuilder::make`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Copy of the whole synced Docusaurus project (`{slug}.docus.src`).
    ProjectExport,
    /// Static site built by the build tool (`{slug}.docus`).
    Site,
}

impl Target {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectExport => "project-export",
            Self::Site => "site",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = BuildError;

    /// Parse a target name. `docus` is accepted as an alias of `project-export`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project-export" | "docus" => Ok(Self::ProjectExport),
            "site" => Ok(Self::Site),
            other => Err(BuildError::UnsupportedTarget(other.to_owned())),
        }
    }
}

/// Progress of one [`DocusBuilder`]. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Uninitialized,
    CacheReady,
    Synced,
    ArtifactReady,
    Failed,
}

/// Summary of a [`DocusBuilder::sync`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of documents copied into `docs/`.
    pub documents: usize,
    /// Number of sidebars written to the manifest.
    pub sidebars: usize,
}

/// Builds Docusaurus artifacts from a chapter tree.
///
/// Every call re-synchronizes the whole project; nothing is incremental.
/// Callers must not run two builders against the same cache directory at
/// once.
pub struct DocusBuilder {
    config: BuildConfig,
    runner: Arc<dyn ToolRunner>,
    cache: ScaffoldCache,
    state: BuildState,
}

impl DocusBuilder {
    /// Create a builder. No filesystem access happens until a method runs.
    #[must_use]
    pub fn new(config: BuildConfig, runner: Arc<dyn ToolRunner>) -> Self {
        let cache = ScaffoldCache::new(config.cache_dir.clone());
        Self {
            config,
            runner,
            cache,
            state: BuildState::Uninitialized,
        }
    }

    #[must_use]
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Destination of the [`Target::Site`] artifact.
    #[must_use]
    pub fn site_dir(&self) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.docus", self.config.slug))
    }

    /// Destination of the [`Target::ProjectExport`] artifact.
    #[must_use]
    pub fn project_export_dir(&self) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.docus.src", self.config.slug))
    }

    /// Scaffold the cache unless it is already usable.
    pub fn ensure_cache(&mut self) -> Result<CacheStatus, BuildError> {
        let result = self
            .cache
            .ensure(self.runner.as_ref(), &self.config.scaffold_command)
            .map_err(BuildError::from);
        self.state = match result {
            Ok(_) => BuildState::CacheReady,
            Err(_) => BuildState::Failed,
        };
        result
    }

    /// Regenerate the build inputs inside the cache.
    ///
    /// Validates the chapter tree, restages every document into `docs/` and
    /// rewrites the generated files under `website/`. Stops at the first
    /// error; a malformed chapter tree is reported before anything on disk
    /// changes.
    pub fn sync(&mut self) -> Result<SyncReport, BuildError> {
        let result = self.sync_project();
        self.state = match result {
            Ok(_) => BuildState::Synced,
            Err(_) => BuildState::Failed,
        };
        result
    }

    /// Produce the artifact named by `target` and return its path.
    ///
    /// The target is checked before anything else, so an unknown target
    /// leaves the cache and previous artifacts untouched.
    pub fn make(&mut self, target: &str) -> Result<PathBuf, MakeError> {
        let result = self.make_target(target);
        match &result {
            Ok(artifact) => {
                self.state = BuildState::ArtifactReady;
                tracing::info!(artifact = %artifact.display(), "Artifact ready");
            }
            Err(_) => self.state = BuildState::Failed,
        }
        result.map_err(MakeError::from)
    }

    fn make_target(&mut self, target: &str) -> Result<PathBuf, BuildError> {
        let target: Target = target.parse()?;
        tracing::info!(%target, slug = %self.config.slug, "Making with Docusaurus");

        self.ensure_cache()?;
        self.sync()?;

        match target {
            Target::ProjectExport => self.export_project(),
            Target::Site => self.build_site(),
        }
    }

    fn sync_project(&self) -> Result<SyncReport, BuildError> {
        let sidebars = build_sidebar_set(&self.config.title, &self.config.chapters)?;

        let docs_dir = self.cache.docs_dir();
        fs_util::recreate_dir(&docs_dir)?;
        let documents =
            fs_util::stage_documents(&self.config.chapters, &self.config.source_dir, &docs_dir)?;
        tracing::info!(documents, dest = %docs_dir.display(), "Staged documents");

        let website_dir = self.cache.website_dir();
        fs_util::write_file(&website_dir.join(SIDEBARS_FILE), sidebars.to_json())?;
        fs_util::write_file(
            &website_dir.join(SITE_CONF_FILE),
            format!("{:#}", self.site_conf()),
        )?;
        fs_util::write_file(&website_dir.join(SITE_CONFIG_FILE), template::SITE_CONFIG_JS)?;
        fs_util::recreate_dir(&website_dir.join(PAGES_DIR))?;
        fs_util::write_file(
            &website_dir.join(INDEX_PAGE),
            template::render_index(&self.config.title, INDEX_DOC_ID),
        )?;

        Ok(SyncReport {
            documents,
            sidebars: sidebars.len(),
        })
    }

    /// `siteConf.json` contents: the title first, then the pass-through options.
    fn site_conf(&self) -> Value {
        let mut conf = Map::new();
        conf.insert("title".to_owned(), Value::String(self.config.title.clone()));
        for (key, value) in &self.config.site_options {
            if key == "title" {
                tracing::warn!("Ignoring site option `title`, the project title is used");
                continue;
            }
            conf.insert(key.clone(), value.clone());
        }
        Value::Object(conf)
    }

    fn export_project(&self) -> Result<PathBuf, BuildError> {
        let dest = self.project_export_dir();
        fs_util::remove_dir_if_exists(&dest)?;
        fs_util::publish_tree(self.cache.root(), &dest)?;
        Ok(dest)
    }

    fn build_site(&self) -> Result<PathBuf, BuildError> {
        let dest = self.site_dir();
        fs_util::remove_dir_if_exists(&dest)?;

        let website_dir = self.cache.website_dir();
        tracing::info!(command = %self.config.build_command, "Building site");
        let output = self.runner.run(&self.config.build_command, &website_dir)?;
        tracing::debug!(output = %output.output, "Build tool finished");

        fs_util::publish_tree(&website_dir.join(BUILD_OUTPUT_DIR), &dest)?;
        Ok(dest)
    }
}
