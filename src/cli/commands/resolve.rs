//! The `resolve` command.

use std::io::Write;

use crate::cli::args::ResolveArgs;
use crate::error::Result;
use crate::loader::{Loader, RegistryPathLoader};
use crate::registry::DEFAULT_MOLD_REGISTRY;

use super::dispatcher::{Command, CommandResult, Workspace};

/// Prints the filesystem path an identifier resolves to.
pub struct ResolveCommand<'a> {
    workspace: &'a Workspace,
    args: ResolveArgs,
}

impl<'a> ResolveCommand<'a> {
    pub fn new(workspace: &'a Workspace, args: ResolveArgs) -> Self {
        Self { workspace, args }
    }
}

impl Command for ResolveCommand<'_> {
    fn execute(&self, out: &mut dyn Write, _err: &mut dyn Write) -> Result<CommandResult> {
        let registry_name = self
            .args
            .registry
            .as_deref()
            .unwrap_or(DEFAULT_MOLD_REGISTRY);
        let loader = RegistryPathLoader::from_registry(&self.workspace.registries, registry_name)?;
        let path = loader.load(&self.args.identifier)?;
        writeln!(out, "{}", path.display())?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn prints_resolved_path() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("moldgate.yml"),
            "registries:\n  mold: { kind: mold, molds: { demo/page: page } }\n",
        )
        .unwrap();
        let workspace = Workspace::load(None, temp.path()).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        ResolveCommand::new(
            &workspace,
            ResolveArgs {
                identifier: "demo/page/missing.txt".to_string(),
                registry: None,
            },
        )
        .execute(&mut out, &mut err)
        .unwrap();

        let expected = temp.path().join("page").join("missing.txt");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", expected.display())
        );
    }

    #[test]
    fn resolves_artifact_references() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("moldgate.yml"),
            "registries:\n  artifacts: { kind: artifact, packages: { demo.pkg: dist } }\n",
        )
        .unwrap();
        let workspace = Workspace::load(None, temp.path()).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        ResolveCommand::new(
            &workspace,
            ResolveArgs {
                identifier: "demo.pkg:app.js".to_string(),
                registry: Some("artifacts".to_string()),
            },
        )
        .execute(&mut out, &mut err)
        .unwrap();

        let expected = temp.path().join("dist").join("app.js");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", expected.display())
        );
    }
}
