//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`Workspace`] for the loaded config and its registries
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{base_dir, build_registries, find_config, load_config_file, MoldgateConfig};
use crate::error::Result;
use crate::registry::Registries;
use crate::response::Response;

use super::check::CheckCommand;
use super::load::LoadCommand;
use super::provide::ProvideCommand;
use super::render::RenderCommand;
use super::resolve::ResolveCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// Content goes to `out`; headers and diagnostics go to `err`.
    fn execute(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// A loaded configuration and the registries built from it.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub config_path: PathBuf,
    pub config: MoldgateConfig,
    pub registries: Registries,
}

impl Workspace {
    /// Discover, load and build.
    pub fn load(explicit: Option<&Path>, start: &Path) -> Result<Self> {
        let config_path = find_config(explicit, start)?;
        let config = load_config_file(&config_path)?;
        let registries = build_registries(&config, &base_dir(&config_path))?;
        Ok(Self {
            config_path,
            config,
            registries,
        })
    }
}

/// Write a response: headers to `err`, content to `out` or `output`.
pub(crate) fn emit(
    response: &Response,
    output: Option<&Path>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    write!(err, "{}", response.headers())?;
    match output {
        Some(path) => {
            std::fs::write(path, response.content().as_bytes())?;
            tracing::info!(
                "Wrote {} bytes to {}",
                response.content().len(),
                path.display()
            );
        }
        None => {
            out.write_all(response.content().as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher rooted at `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    pub fn dispatch(
        &self,
        cli: &Cli,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<CommandResult> {
        let workspace = Workspace::load(cli.config.as_deref(), &self.working_dir)?;
        tracing::debug!("Using config {}", workspace.config_path.display());

        match &cli.command {
            Commands::Provide(args) => {
                ProvideCommand::new(&workspace, args.clone()).execute(out, err)
            }
            Commands::Load(args) => LoadCommand::new(&workspace, args.clone()).execute(out, err),
            Commands::Resolve(args) => {
                ResolveCommand::new(&workspace, args.clone()).execute(out, err)
            }
            Commands::Render(args) => {
                RenderCommand::new(&workspace, args.clone()).execute(out, err)
            }
            Commands::Check(args) => CheckCommand::new(&workspace, args.clone()).execute(out, err),
        }
    }
}
