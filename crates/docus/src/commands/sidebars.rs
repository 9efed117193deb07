//! `docus sidebars` command implementation.

use std::path::PathBuf;

use clap::Args;
use docus_config::{CliSettings, Config};
use docus_sidebars::build_sidebar_set;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebars command.
#[derive(Args)]
pub(crate) struct SidebarsArgs {
    /// Project title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Path to configuration file (default: auto-discover docus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl SidebarsArgs {
    /// Print the sidebar manifest the build would write.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            title: self.title,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let sidebars = build_sidebar_set(&config.title, config.require_chapters()?)?;
        Output::new().result(&sidebars.to_json());
        Ok(())
    }
}
