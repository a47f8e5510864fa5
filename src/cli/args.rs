//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_ENV;

/// moldgate - serve mold files, packaged artifacts and rendered templates.
#[derive(Debug, Parser)]
#[command(name = "moldgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides discovery of moldgate.yml)
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve a public filename through a configured provider
    Provide(ProvideArgs),

    /// Load raw bytes for a mold path or artifact reference
    Load(LoadArgs),

    /// Print the filesystem path of a mold path or artifact reference
    Resolve(ResolveArgs),

    /// Render a template or mold
    Render(RenderArgs),

    /// Validate configuration and list registries and providers
    Check(CheckArgs),
}

/// Arguments for the `provide` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ProvideArgs {
    /// Provider name from the config
    pub provider: String,

    /// Public filename to serve
    pub filename: String,

    /// Write content to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `load` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LoadArgs {
    /// Mold path, or `package:artifact` with --artifact
    pub identifier: String,

    /// Treat the identifier as a packaged artifact reference
    #[arg(short, long)]
    pub artifact: bool,

    /// Registry to load from (defaults per kind)
    #[arg(short, long)]
    pub registry: Option<String>,

    /// Write content to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Mold path, or `package:artifact` for an artifact registry
    pub identifier: String,

    /// Registry of any kind to resolve against
    #[arg(short, long)]
    pub registry: Option<String>,
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Template id (mold path), or mold id with --mold
    pub template_id: String,

    /// Render a whole mold inside its container element
    #[arg(short, long)]
    pub mold: bool,

    /// Template data as key=value (repeatable)
    #[arg(short, long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// Template data as a JSON object, applied before --data
    #[arg(long, value_name = "JSON")]
    pub json: Option<String>,

    /// Content type for the response
    #[arg(long)]
    pub content_type: Option<String>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Also list every mapped filename
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn config_flag_reads_environment_variable() {
        let command = Cli::command();
        let config = command
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();
        assert_eq!(config.get_env(), Some(std::ffi::OsStr::new(CONFIG_ENV)));
    }

    #[test]
    fn parses_provide() {
        let cli = Cli::parse_from(["moldgate", "provide", "static", "logo.png"]);
        match cli.command {
            Commands::Provide(args) => {
                assert_eq!(args.provider, "static");
                assert_eq!(args.filename, "logo.png");
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "moldgate",
            "resolve",
            "demo/page/logo.png",
            "--config",
            "/srv/moldgate.yml",
            "--debug",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/srv/moldgate.yml")));
    }

    #[test]
    fn parses_repeated_data() {
        let cli = Cli::parse_from([
            "moldgate",
            "render",
            "demo/page/hello.nja",
            "-d",
            "a=1",
            "--data",
            "b=2",
        ]);
        match cli.command {
            Commands::Render(args) => assert_eq!(args.data, vec!["a=1", "b=2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_artifact_load() {
        let cli = Cli::parse_from(["moldgate", "load", "--artifact", "demo.pkg:app.js"]);
        match cli.command {
            Commands::Load(args) => {
                assert!(args.artifact);
                assert_eq!(args.identifier, "demo.pkg:app.js");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
