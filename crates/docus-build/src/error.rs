//! Build error types.

use std::io;
use std::path::{Path, PathBuf};

use docus_cache::{CacheError, ToolError};
use docus_sidebars::SidebarError;

/// Error raised by a build step.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The chapter tree has the wrong shape.
    #[error(transparent)]
    Config(#[from] SidebarError),
    /// A declared source document could not be staged.
    #[error("Cannot stage `{path}`: {reason}")]
    Staging {
        /// Document path as written in the chapter tree.
        path: String,
        reason: String,
    },
    /// An external tool failed; carries its captured output.
    #[error(transparent)]
    Tool(#[from] ToolError),
    /// The requested target is not one of the supported targets.
    #[error("Docusaurus cannot make `{0}`")]
    UnsupportedTarget(String),
    /// An artifact destination lies inside the tree it is copied from.
    #[error(
        "Cannot publish {} inside {}: the copy would contain itself",
        .dest.display(),
        .src.display()
    )]
    NestedOutput { src: PathBuf, dest: PathBuf },
    /// Filesystem error.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Closure mapping an [`io::Error`] to [`BuildError::Io`] at `path`.
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<CacheError> for BuildError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::CreateDir { path, source } => Self::Io { path, source },
            CacheError::Tool(tool) => Self::Tool(tool),
        }
    }
}

/// Error returned by [`DocusBuilder::make`](crate::DocusBuilder::make).
///
/// Wraps whatever step failed with a uniform `Build failed:` prefix. The
/// underlying [`BuildError`] is available unchanged through [`kind`](Self::kind).
#[derive(Debug, thiserror::Error)]
#[error("Build failed: {0}")]
pub struct MakeError(#[source] BuildError);

impl MakeError {
    /// The error raised by the failing step.
    #[must_use]
    pub fn kind(&self) -> &BuildError {
        &self.0
    }
}

impl From<BuildError> for MakeError {
    fn from(err: BuildError) -> Self {
        Self(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_error_prefix_and_kind() {
        let err = MakeError::from(BuildError::UnsupportedTarget("pdf".to_owned()));
        assert_eq!(err.to_string(), "Build failed: Docusaurus cannot make `pdf`");
        assert!(matches!(err.kind(), BuildError::UnsupportedTarget(t) if t == "pdf"));
    }

    #[test]
    fn test_make_error_keeps_tool_output() {
        let err = MakeError::from(BuildError::Tool(ToolError::Failed {
            command: "docusaurus-build".to_owned(),
            code: Some(1),
            output: "Error: sidebars.json is invalid".to_owned(),
        }));
        let msg = err.to_string();
        assert!(msg.starts_with("Build failed: `docusaurus-build`"));
        assert!(msg.contains("sidebars.json is invalid"));
    }

    #[test]
    fn test_cache_error_conversion() {
        let err = BuildError::from(CacheError::CreateDir {
            path: PathBuf::from("/ro/.cache"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert!(matches!(err, BuildError::Io { ref path, .. } if path == Path::new("/ro/.cache")));
    }

    #[test]
    fn test_staging_error_names_path() {
        let err = BuildError::Staging {
            path: "guide/missing.md".to_owned(),
            reason: "source file not found".to_owned(),
        };
        assert!(err.to_string().contains("`guide/missing.md`"));
    }
}
