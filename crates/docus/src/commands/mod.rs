//! CLI command implementations.

mod make;
mod sidebars;

use docus_build::BuildConfig;
use docus_config::Config;

use crate::error::CliError;

pub(crate) use make::MakeArgs;
pub(crate) use sidebars::SidebarsArgs;

/// Map a loaded project configuration onto the builder's configuration.
fn build_config(config: &Config) -> Result<BuildConfig, CliError> {
    Ok(BuildConfig {
        title: config.title.clone(),
        chapters: config.require_chapters()?.clone(),
        source_dir: config.paths.source_dir.clone(),
        cache_dir: config.paths.cache_dir.clone(),
        output_dir: config.paths.output_dir.clone(),
        slug: config.slug(),
        site_options: config.docus.site.clone(),
        scaffold_command: config.docus.scaffold_command.clone(),
        build_command: config.docus.build_command.clone(),
    })
}
