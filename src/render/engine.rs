//! Template engine interfaces and the minijinja-backed implementation.
//!
//! Template ids are mold id paths (`namespace/mold/file.nja`); the engine
//! reads template sources through a [`MoldRegistry`].

use crate::error::{MoldgateError, Result};
use crate::registry::{MoldRegistry, Registries, DEFAULT_MOLD_REGISTRY};
use crate::render::Data;
use minijinja::{Environment, ErrorKind};
use std::fmt;
use std::fs;
use std::io;
use std::sync::Arc;

/// File name of a mold's entry template.
pub const MOLD_TEMPLATE: &str = "template.nja";

/// A compiled template.
pub trait Template: fmt::Debug + Send + Sync {
    fn render(&self, data: &Data) -> Result<String>;
}

/// Loads and renders templates by id.
pub trait TemplateEngine: fmt::Debug + Send + Sync {
    /// Load and compile a template.
    fn load_template(&self, template_id: &str) -> Result<Arc<dyn Template>>;

    /// Load a template and render it with `data`.
    fn render_template(&self, template_id: &str, data: &Data) -> Result<String> {
        self.load_template(template_id)?.render(data)
    }
}

/// Template engine that also understands molds.
pub trait MoldEngine: TemplateEngine {
    /// Render a mold's entry template as is.
    fn execute(&self, mold_id: &str, data: &Data) -> Result<String>;

    /// Render a mold's entry template inside its mold container element.
    fn render(&self, mold_id: &str, data: &Data) -> Result<String>;
}

/// minijinja-backed engine whose template loader resolves through a mold
/// registry.
///
/// Each [`TemplateEngine::load_template`] call builds a fresh environment,
/// so template sources are re-read from disk on every load.
#[derive(Debug, Clone)]
pub struct JinjaEngine {
    registry: Arc<dyn MoldRegistry>,
}

impl JinjaEngine {
    /// Build an engine that reads templates through `registry`.
    pub fn new(registry: Arc<dyn MoldRegistry>) -> Self {
        Self { registry }
    }

    /// Build an engine on the default mold registry.
    pub fn from_registries(registries: &Registries) -> Result<Self> {
        Self::from_registry(registries, DEFAULT_MOLD_REGISTRY)
    }

    /// Build an engine on the mold registry registered under `registry_name`.
    pub fn from_registry(registries: &Registries, registry_name: &str) -> Result<Self> {
        Ok(Self::new(registries.mold(registry_name)?))
    }

    fn environment(&self) -> Environment<'static> {
        let registry = Arc::clone(&self.registry);
        let mut env = Environment::new();
        env.set_loader(move |name| load_source(registry.as_ref(), name));
        env
    }
}

/// Template loader callback. Only an unknown mold counts as a missing
/// template; other registry errors surface as loader failures.
fn load_source(
    registry: &dyn MoldRegistry,
    name: &str,
) -> std::result::Result<Option<String>, minijinja::Error> {
    let path = match registry.lookup_path(name) {
        Ok(path) => path,
        Err(e @ MoldgateError::UnknownMold { .. }) => {
            tracing::debug!("Template {} not resolvable: {}", name, e);
            return Ok(None);
        }
        Err(e) => {
            return Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("could not resolve template {}", name),
            )
            .with_source(e))
        }
    };

    match fs::read_to_string(&path) {
        Ok(source) => {
            tracing::debug!("Loaded template {} from {}", name, path.display());
            Ok(Some(source))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template {}", path.display()),
        )
        .with_source(e)),
    }
}

struct JinjaTemplate {
    env: Environment<'static>,
    name: String,
}

impl fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Template for JinjaTemplate {
    fn render(&self, data: &Data) -> Result<String> {
        let template = self.env.get_template(&self.name)?;
        Ok(template.render(data)?)
    }
}

impl TemplateEngine for JinjaEngine {
    fn load_template(&self, template_id: &str) -> Result<Arc<dyn Template>> {
        // Resolution errors propagate as they are, before minijinja sees the id.
        self.registry.lookup_path(template_id)?;

        let env = self.environment();
        // Compile eagerly so a missing or broken template fails here.
        env.get_template(template_id)?;
        Ok(Arc::new(JinjaTemplate {
            env,
            name: template_id.to_string(),
        }))
    }
}

impl MoldEngine for JinjaEngine {
    fn execute(&self, mold_id: &str, data: &Data) -> Result<String> {
        if mold_id.split('/').count() != 2 {
            return Err(MoldgateError::InvalidMoldPath {
                path: mold_id.to_string(),
                message: "expected a mold id of the form '{namespace}/{mold_name}'".to_string(),
            });
        }
        self.render_template(&format!("{}/{}", mold_id, MOLD_TEMPLATE), data)
    }

    fn render(&self, mold_id: &str, data: &Data) -> Result<String> {
        let content = self.execute(mold_id, data)?;
        Ok(format!(
            "<div data-nunja=\"{}\">\n{}\n</div>",
            mold_id, content
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DirMoldRegistry;
    use crate::render::data_from;
    use tempfile::TempDir;

    fn engine_with(files: &[(&str, &str)]) -> (TempDir, JinjaEngine) {
        let temp = TempDir::new().unwrap();
        for (name, source) in files {
            fs::write(temp.path().join(name), source).unwrap();
        }
        let registry = DirMoldRegistry::new().with_mold("demo/page", temp.path());
        (temp, JinjaEngine::new(Arc::new(registry)))
    }

    #[test]
    fn render_template_uses_data() {
        let (_temp, engine) = engine_with(&[("hello.nja", "Hello {{ name }}!")]);
        let out = engine
            .render_template("demo/page/hello.nja", &data_from([("name", "World")]))
            .unwrap();
        assert_eq!(out, "Hello World!");
    }

    #[test]
    fn load_template_fails_for_missing_template() {
        let (_temp, engine) = engine_with(&[]);
        let err = engine.load_template("demo/page/missing.nja").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn load_template_fails_for_unknown_mold() {
        let (_temp, engine) = engine_with(&[]);
        let err = engine.load_template("demo/other/x.nja").unwrap_err();
        assert!(matches!(err, MoldgateError::UnknownMold { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn load_template_keeps_malformed_path_errors() {
        let (_temp, engine) = engine_with(&[]);
        let err = engine.load_template("demo/page/a//b.nja").unwrap_err();
        assert!(matches!(err, MoldgateError::InvalidMoldPath { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn malformed_include_is_not_a_missing_template() {
        let (_temp, engine) = engine_with(&[("base.nja", "{% include 'demo/page/../x.nja' %}")]);
        let err = engine
            .render_template("demo/page/base.nja", &Data::new())
            .unwrap_err();
        assert!(matches!(err, MoldgateError::Template(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn edited_templates_are_reread() {
        let (temp, engine) = engine_with(&[("t.nja", "v1")]);
        let first = engine.render_template("demo/page/t.nja", &Data::new()).unwrap();
        fs::write(temp.path().join("t.nja"), "v2").unwrap();
        let second = engine.render_template("demo/page/t.nja", &Data::new()).unwrap();
        assert_eq!(first, "v1");
        assert_eq!(second, "v2");
    }

    #[test]
    fn load_template_reports_syntax_errors() {
        let (_temp, engine) = engine_with(&[("broken.nja", "{% if %}")]);
        let err = engine.load_template("demo/page/broken.nja").unwrap_err();
        assert!(matches!(err, MoldgateError::Template(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn templates_can_include_siblings() {
        let (_temp, engine) = engine_with(&[
            ("base.nja", "[{% include 'demo/page/part.nja' %}]"),
            ("part.nja", "{{ x }}"),
        ]);
        let out = engine
            .render_template("demo/page/base.nja", &data_from([("x", 1)]))
            .unwrap();
        assert_eq!(out, "[1]");
    }

    #[test]
    fn execute_renders_mold_entry_template() {
        let (_temp, engine) = engine_with(&[(MOLD_TEMPLATE, "<p>{{ msg }}</p>")]);
        let out = engine
            .execute("demo/page", &data_from([("msg", "hi")]))
            .unwrap();
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    fn render_wraps_in_mold_container() {
        let (_temp, engine) = engine_with(&[(MOLD_TEMPLATE, "<p>{{ msg }}</p>")]);
        let out = MoldEngine::render(&engine, "demo/page", &data_from([("msg", "hi")])).unwrap();
        assert_eq!(out, "<div data-nunja=\"demo/page\">\n<p>hi</p>\n</div>");
    }

    #[test]
    fn execute_rejects_mold_id_paths() {
        let (_temp, engine) = engine_with(&[]);
        let err = engine.execute("demo/page/extra", &Data::new()).unwrap_err();
        assert!(matches!(err, MoldgateError::InvalidMoldPath { .. }));
    }
}
