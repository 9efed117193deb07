//! Persistent Docusaurus scaffold cache.
//!
//! The cache directory holds a Docusaurus project generated once by the
//! scaffolding tool and reused by every later build:
//!
//! ```text
//! {root}/
//! +-- docs/        # staged source documents, rebuilt on every sync
//! +-- website/     # scaffold: sidebars.json, siteConfig.js, pages/, static/
//! ```
//!
//! The cache counts as initialized when both directories exist. Their
//! contents are not inspected, so a half-written scaffold that still has both
//! directories is reused as is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::tool::{ToolError, ToolRunner};

/// Staging subdirectory for source documents.
pub const DOCS_DIR: &str = "docs";

/// Scaffold subdirectory produced by the scaffolding tool.
pub const WEBSITE_DIR: &str = "website";

/// Outcome of [`ScaffoldCache::ensure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Both marker directories were present; nothing was done.
    Reused,
    /// The scaffolding tool was run.
    Scaffolded,
}

/// Error returned while preparing the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to create cache directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Scaffolding failed: {0}")]
    Tool(#[from] ToolError),
}

/// Scaffold cache rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct ScaffoldCache {
    root: PathBuf,
}

impl ScaffoldCache {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging directory (`{root}/docs`).
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(DOCS_DIR)
    }

    /// Scaffold directory (`{root}/website`).
    #[must_use]
    pub fn website_dir(&self) -> PathBuf {
        self.root.join(WEBSITE_DIR)
    }

    /// Whether both marker directories exist.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.docs_dir().is_dir() && self.website_dir().is_dir()
    }

    /// Make sure the scaffold exists, running `scaffold_command` if it doesn't.
    ///
    /// Idempotent: when both marker directories exist this returns
    /// [`CacheStatus::Reused`] without touching the filesystem or running
    /// anything. Otherwise the cache root is created and the command runs
    /// once with the root as working directory. Failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::CreateDir`] if the root cannot be created and
    /// [`CacheError::Tool`] (carrying the tool output) if scaffolding fails.
    pub fn ensure(
        &self,
        runner: &dyn ToolRunner,
        scaffold_command: &str,
    ) -> Result<CacheStatus, CacheError> {
        if self.is_ready() {
            tracing::debug!(root = %self.root.display(), "Scaffold cache is ready");
            return Ok(CacheStatus::Reused);
        }

        tracing::info!(
            root = %self.root.display(),
            command = scaffold_command,
            "Initializing scaffold cache"
        );
        fs::create_dir_all(&self.root).map_err(|source| CacheError::CreateDir {
            path: self.root.clone(),
            source,
        })?;

        runner.run(scaffold_command, &self.root)?;

        if !self.is_ready() {
            tracing::warn!(
                root = %self.root.display(),
                "Scaffolding finished but `{DOCS_DIR}` or `{WEBSITE_DIR}` is missing"
            );
        }
        Ok(CacheStatus::Scaffolded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingRunner;
    use tempfile::TempDir;

    const INIT: &str = "docusaurus-init";

    fn scaffolding_runner() -> RecordingRunner {
        RecordingRunner::new().on_run(INIT, |cwd| {
            fs::create_dir_all(cwd.join(DOCS_DIR))?;
            fs::create_dir_all(cwd.join(WEBSITE_DIR))
        })
    }

    #[test]
    fn test_paths() {
        let cache = ScaffoldCache::new("/project/.cache");
        assert_eq!(cache.root(), Path::new("/project/.cache"));
        assert_eq!(cache.docs_dir(), PathBuf::from("/project/.cache/docs"));
        assert_eq!(cache.website_dir(), PathBuf::from("/project/.cache/website"));
    }

    #[test]
    fn test_ensure_fresh_runs_scaffold_in_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("nested/.cache");
        let cache = ScaffoldCache::new(&root);
        let runner = scaffolding_runner();

        let status = cache.ensure(&runner, INIT).unwrap();

        assert_eq!(status, CacheStatus::Scaffolded);
        assert!(cache.is_ready());
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].command, INIT);
        assert_eq!(calls[0].cwd, root);
    }

    #[test]
    fn test_ensure_ready_cache_runs_nothing() {
        let tmp = TempDir::new().unwrap();
        let cache = ScaffoldCache::new(tmp.path());
        fs::create_dir_all(cache.docs_dir()).unwrap();
        fs::create_dir_all(cache.website_dir()).unwrap();
        let runner = scaffolding_runner();

        let status = cache.ensure(&runner, INIT).unwrap();

        assert_eq!(status, CacheStatus::Reused);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let cache = ScaffoldCache::new(tmp.path().join("cache"));
        let runner = scaffolding_runner();

        cache.ensure(&runner, INIT).unwrap();
        let second = cache.ensure(&runner, INIT).unwrap();

        assert_eq!(second, CacheStatus::Reused);
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn test_ensure_with_one_marker_rescaffolds() {
        let tmp = TempDir::new().unwrap();
        let cache = ScaffoldCache::new(tmp.path());
        fs::create_dir_all(cache.website_dir()).unwrap();
        let runner = scaffolding_runner();

        let status = cache.ensure(&runner, INIT).unwrap();

        assert_eq!(status, CacheStatus::Scaffolded);
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn test_ensure_marker_files_are_not_directories() {
        let tmp = TempDir::new().unwrap();
        let cache = ScaffoldCache::new(tmp.path());
        fs::write(cache.docs_dir(), b"").unwrap();
        fs::write(cache.website_dir(), b"").unwrap();

        assert!(!cache.is_ready());
    }

    #[test]
    fn test_ensure_tool_failure_carries_output() {
        let tmp = TempDir::new().unwrap();
        let cache = ScaffoldCache::new(tmp.path().join("cache"));
        let runner = RecordingRunner::new().failing(INIT, "npm ERR! missing package");

        let err = cache.ensure(&runner, INIT).unwrap_err();

        assert!(matches!(err, CacheError::Tool(ToolError::Failed { .. })));
        assert!(err.to_string().contains("npm ERR! missing package"));
        // The root is left behind for the next attempt.
        assert!(cache.root().is_dir());
    }

    #[test]
    fn test_ensure_tolerates_missing_markers_after_success() {
        let tmp = TempDir::new().unwrap();
        let cache = ScaffoldCache::new(tmp.path().join("cache"));
        let runner = RecordingRunner::new();

        let status = cache.ensure(&runner, INIT).unwrap();

        assert_eq!(status, CacheStatus::Scaffolded);
        assert!(!cache.is_ready());
    }
}
