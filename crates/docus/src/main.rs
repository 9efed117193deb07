//! Docus CLI - Docusaurus documentation builder.
//!
//! Provides commands for:
//! - `make <target>`: Build the static site or export the Docusaurus project
//! - `sidebars`: Print the generated sidebar manifest

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MakeArgs, SidebarsArgs};
use output::Output;

/// Docus - Docusaurus documentation builder.
#[derive(Parser)]
#[command(name = "docus", version, about)]
struct Cli {
    /// Enable verbose output (INFO level logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make an artifact: `site` or `project-export`.
    Make(MakeArgs),
    /// Print the sidebar manifest as JSON.
    Sidebars(SidebarsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Make(args) => args.execute(),
        Commands::Sidebars(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_make_with_global_verbose() {
        let cli = Cli::try_parse_from(["docus", "make", "site", "-v", "--slug", "manual"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Make(_)));
    }

    #[test]
    fn test_make_requires_target() {
        assert!(Cli::try_parse_from(["docus", "make"]).is_err());
    }
}
