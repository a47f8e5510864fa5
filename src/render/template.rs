//! Renderers that turn template output into responses.

use crate::error::Result;
use crate::render::engine::{MoldEngine, Template, TemplateEngine};
use crate::render::wrapper::TemplateRenderWrapper;
use crate::render::{Data, DEFAULT_CONTENT_TYPE};
use crate::response::{Headers, Response};

/// Renders templates by id into responses with a `content-type` header.
#[derive(Debug, Clone)]
pub struct TemplateRenderer<E> {
    engine: E,
}

impl<E: TemplateEngine> TemplateRenderer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Load a template into a staged wrapper.
    ///
    /// `content-type: text/html` is added unless `headers` already carries a
    /// content type.
    pub fn load_template(&self, template_id: &str, headers: Headers) -> Result<TemplateRenderWrapper> {
        let template = self.engine.load_template(template_id)?;
        let mut headers = headers;
        headers.set_default("content-type", DEFAULT_CONTENT_TYPE);
        Ok(TemplateRenderWrapper::new(template, headers))
    }

    /// Render a template and wrap it in a response.
    pub fn render(
        &self,
        template_id: &str,
        data: &Data,
        content_type: Option<&str>,
    ) -> Result<Response> {
        tracing::debug!("Rendering template {}", template_id);
        let content = self.engine.render_template(template_id, data)?;
        let headers = Headers::new().with(
            "content-type",
            content_type.unwrap_or(DEFAULT_CONTENT_TYPE),
        );
        Ok(Response::new(content, headers))
    }
}

/// Drives a mold engine and builds full responses for molds.
#[derive(Debug, Clone)]
pub struct MoldRenderer<E> {
    engine: E,
}

impl<E: MoldEngine> MoldRenderer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn execute(&self, mold_id: &str, data: &Data) -> Result<String> {
        self.engine.execute(mold_id, data)
    }

    pub fn render(&self, mold_id: &str, data: &Data) -> Result<String> {
        self.engine.render(mold_id, data)
    }

    /// Shorthand for rendering a template within a mold.
    pub fn render_template(&self, mold_id_template: &str, data: &Data) -> Result<String> {
        self.engine.load_template(mold_id_template)?.render(data)
    }

    /// Render a mold and wrap it in a response with a `Content-type` header.
    pub fn respond(&self, mold_id: &str, data: &Data, content_type: Option<&str>) -> Result<Response> {
        tracing::debug!("Rendering mold {}", mold_id);
        let content = self.engine.render(mold_id, data)?;
        let headers = Headers::new().with(
            "Content-type",
            content_type.unwrap_or(DEFAULT_CONTENT_TYPE),
        );
        Ok(Response::new(content, headers))
    }
}
