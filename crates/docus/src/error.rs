//! CLI error types.

use docus_build::MakeError;
use docus_config::ConfigError;
use docus_sidebars::SidebarError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Sidebar(#[from] SidebarError),

    #[error("{0}")]
    Make(#[from] MakeError),
}
