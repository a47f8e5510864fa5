//! The `check` command.

use std::io::Write;

use crate::cli::args::CheckArgs;
use crate::config::{validate_config, RegistryConfig};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult, Workspace};

/// Validates the configuration and lists what it defines.
pub struct CheckCommand<'a> {
    workspace: &'a Workspace,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    pub fn new(workspace: &'a Workspace, args: CheckArgs) -> Self {
        Self { workspace, args }
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<CommandResult> {
        let config = &self.workspace.config;
        writeln!(out, "Config: {}", self.workspace.config_path.display())?;

        writeln!(out, "Registries:")?;
        for (name, registry) in &config.registries {
            let kind = match registry {
                RegistryConfig::Mold { .. } => "mold",
                RegistryConfig::Artifact { .. } => "artifact",
            };
            writeln!(out, "  {} ({})", name, kind)?;
        }

        writeln!(out, "Providers:")?;
        for (name, provider) in &config.providers {
            writeln!(
                out,
                "  {} -> {} ({} files)",
                name,
                provider.registry_name(),
                provider.files.len()
            )?;
            if self.args.verbose {
                for (filename, identifier) in &provider.files {
                    writeln!(out, "    {} = {}", filename, identifier)?;
                }
            }
        }

        let errors = validate_config(config);
        if errors.is_empty() {
            writeln!(out, "Configuration is valid")?;
            return Ok(CommandResult::success());
        }

        for error in &errors {
            writeln!(err, "[{}] {}", error.rule, error.message)?;
        }
        writeln!(err, "{} problem(s) found", errors.len())?;
        Ok(CommandResult::failure(1))
    }
}
