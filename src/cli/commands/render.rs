//! The `render` command.

use std::io::Write;

use serde_json::Value;

use crate::cli::args::RenderArgs;
use crate::config::build_engine;
use crate::error::{MoldgateError, Result};
use crate::render::{Data, MoldRenderer, TemplateRenderer};

use super::dispatcher::{emit, Command, CommandResult, Workspace};

/// Renders a template, or a whole mold with `--mold`.
pub struct RenderCommand<'a> {
    workspace: &'a Workspace,
    args: RenderArgs,
}

impl<'a> RenderCommand<'a> {
    pub fn new(workspace: &'a Workspace, args: RenderArgs) -> Self {
        Self { workspace, args }
    }

    /// Collect template data: `--json` first, then each `--data` pair.
    fn data(&self) -> Result<Data> {
        let mut data = match &self.args.json {
            Some(json) => match serde_json::from_str::<Value>(json) {
                Ok(Value::Object(map)) => map,
                Ok(_) => return Err(invalid_data("--json must be a JSON object")),
                Err(e) => return Err(invalid_data(&format!("--json is not valid JSON: {}", e))),
            },
            None => Data::new(),
        };

        for pair in &self.args.data {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid_data(&format!("'{}' is not in KEY=VALUE form", pair)))?;
            data.insert(key.to_string(), Value::String(value.to_string()));
        }

        Ok(data)
    }
}

fn invalid_data(message: &str) -> MoldgateError {
    MoldgateError::Other(anyhow::anyhow!("Invalid template data: {}", message))
}

impl Command for RenderCommand<'_> {
    fn execute(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<CommandResult> {
        let data = self.data()?;
        let engine = build_engine(&self.workspace.config, &self.workspace.registries)?;
        let content_type = self.args.content_type.as_deref();

        let response = if self.args.mold {
            MoldRenderer::new(engine).respond(&self.args.template_id, &data, content_type)?
        } else {
            TemplateRenderer::new(engine).render(&self.args.template_id, &data, content_type)?
        };

        emit(&response, None, out, err)?;
        Ok(CommandResult::success())
    }
}
