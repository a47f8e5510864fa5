//! The `load` command.

use std::io::Write;

use crate::cli::args::LoadArgs;
use crate::error::Result;
use crate::loader::{ArtifactLoader, BinaryLoader};
use crate::registry::{DEFAULT_ARTIFACT_REGISTRY, DEFAULT_MOLD_REGISTRY};
use crate::render::{ArtifactRenderer, MoldDataRenderer, Render};

use super::dispatcher::{emit, Command, CommandResult, Workspace};

/// Loads raw bytes for a mold path or an artifact reference.
pub struct LoadCommand<'a> {
    workspace: &'a Workspace,
    args: LoadArgs,
}

impl<'a> LoadCommand<'a> {
    pub fn new(workspace: &'a Workspace, args: LoadArgs) -> Self {
        Self { workspace, args }
    }

    fn registry_name(&self) -> &str {
        match (&self.args.registry, self.args.artifact) {
            (Some(name), _) => name,
            (None, true) => DEFAULT_ARTIFACT_REGISTRY,
            (None, false) => DEFAULT_MOLD_REGISTRY,
        }
    }
}

impl Command for LoadCommand<'_> {
    fn execute(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<CommandResult> {
        let registries = &self.workspace.registries;
        let registry_name = self.registry_name();

        let response = if self.args.artifact {
            ArtifactRenderer::new(ArtifactLoader::from_registry(registries, registry_name)?)
                .render(&self.args.identifier)?
        } else {
            MoldDataRenderer::new(BinaryLoader::from_registry(registries, registry_name)?)
                .render(&self.args.identifier)?
        };

        emit(&response, self.args.output.as_deref(), out, err)?;
        Ok(CommandResult::success())
    }
}
