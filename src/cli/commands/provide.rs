//! The `provide` command.

use std::io::Write;

use crate::cli::args::ProvideArgs;
use crate::config::build_provider;
use crate::error::Result;
use crate::render::Render;

use super::dispatcher::{emit, Command, CommandResult, Workspace};

/// Serves a public filename through a configured provider.
pub struct ProvideCommand<'a> {
    workspace: &'a Workspace,
    args: ProvideArgs,
}

impl<'a> ProvideCommand<'a> {
    pub fn new(workspace: &'a Workspace, args: ProvideArgs) -> Self {
        Self { workspace, args }
    }
}

impl Command for ProvideCommand<'_> {
    fn execute(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<CommandResult> {
        let provider = build_provider(
            &self.workspace.config,
            &self.args.provider,
            &self.workspace.registries,
        )?;
        let response = provider.render(&self.args.filename)?;
        emit(&response, self.args.output.as_deref(), out, err)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoldgateError;
    use std::fs;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Workspace) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("page")).unwrap();
        fs::write(temp.path().join("page/style.css"), "body {}").unwrap();
        fs::write(
            temp.path().join("moldgate.yml"),
            r#"
registries:
  mold: { kind: mold, molds: { demo/page: page } }
providers:
  static:
    files: { site.css: demo/page/style.css }
"#,
        )
        .unwrap();
        let workspace = Workspace::load(None, temp.path()).unwrap();
        (temp, workspace)
    }

    fn args(filename: &str) -> ProvideArgs {
        ProvideArgs {
            provider: "static".to_string(),
            filename: filename.to_string(),
            output: None,
        }
    }

    #[test]
    fn serves_mapped_file() {
        let (_temp, workspace) = workspace();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = ProvideCommand::new(&workspace, args("site.css"))
            .execute(&mut out, &mut err)
            .unwrap();
        assert!(result.success);
        assert_eq!(out, b"body {}");
        assert_eq!(String::from_utf8(err).unwrap(), "Content-type: text/css\n");
    }

    #[test]
    fn unmapped_filename_is_not_found() {
        let (_temp, workspace) = workspace();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let e = ProvideCommand::new(&workspace, args("other.css"))
            .execute(&mut out, &mut err)
            .unwrap_err();
        assert!(matches!(e, MoldgateError::MappingMiss { .. }));
        assert!(out.is_empty());
    }
}
