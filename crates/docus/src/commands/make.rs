//! `docus make` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docus_build::DocusBuilder;
use docus_cache::ShellRunner;
use docus_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the make command.
#[derive(Args)]
pub(crate) struct MakeArgs {
    /// Target to make: `site` or `project-export`.
    target: String,

    /// Project title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Scaffold cache directory (overrides config).
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Directory receiving the artifact (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Artifact name stem (overrides config).
    #[arg(long)]
    slug: Option<String>,

    /// Path to configuration file (default: auto-discover docus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl MakeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            title: self.title,
            source_dir: self.source_dir,
            cache_dir: self.cache_dir,
            output_dir: self.output_dir,
            slug: self.slug,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Loaded configuration");
        let build_config = super::build_config(&config)?;

        output.info(&format!("Source: {}", build_config.source_dir.display()));
        output.info(&format!("Cache: {}", build_config.cache_dir.display()));

        let mut builder = DocusBuilder::new(build_config, Arc::new(ShellRunner));
        let artifact = builder.make(&self.target)?;

        output.success(&format!("Result: {}", artifact.display()));
        output.result(&artifact.display().to_string());
        Ok(())
    }
}
