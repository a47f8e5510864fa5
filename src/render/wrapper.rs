//! Staged template rendering.
//!
//! A [`TemplateRenderWrapper`] holds a compiled template, its headers and
//! the data accumulated so far. [`TemplateRenderWrapper::prerender`] returns
//! a new wrapper with more data bound, so a pipeline can specialize a
//! template step by step without repeating earlier arguments.
//!
//! ```
//! # use std::sync::Arc;
//! # use moldgate::render::{data_from, Data, Template, TemplateRenderWrapper};
//! # use moldgate::response::Headers;
//! # #[derive(Debug)]
//! # struct Echo;
//! # impl Template for Echo {
//! #     fn render(&self, data: &Data) -> moldgate::Result<String> {
//! #         Ok(serde_json::to_string(data).unwrap())
//! #     }
//! # }
//! let base = TemplateRenderWrapper::new(Arc::new(Echo), Headers::new());
//! let staged = base.prerender(&data_from([("a", "b")]));
//! let response = staged.render(&data_from([("c", "d")])).unwrap();
//!
//! assert_eq!(response.content().as_text(), Some(r#"{"a":"b","c":"d"}"#));
//! assert!(base.data().is_empty());
//! ```

use crate::error::Result;
use crate::render::engine::Template;
use crate::render::Data;
use crate::response::{Headers, Response};
use std::sync::Arc;

/// Compiled template bound to headers and accumulated data.
#[derive(Debug, Clone)]
pub struct TemplateRenderWrapper {
    template: Arc<dyn Template>,
    headers: Headers,
    data: Data,
}

impl TemplateRenderWrapper {
    /// Wrap a template with no data bound.
    pub fn new(template: Arc<dyn Template>, headers: Headers) -> Self {
        Self::with_data(template, headers, Data::new())
    }

    /// Wrap a template with initial data.
    pub fn with_data(template: Arc<dyn Template>, headers: Headers, data: Data) -> Self {
        Self {
            template,
            headers,
            data,
        }
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The data bound so far.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// A fresh map of the bound data with `extra` merged on top.
    pub fn build_data(&self, extra: &Data) -> Data {
        let mut data = self.data.clone();
        for (key, value) in extra {
            data.insert(key.clone(), value.clone());
        }
        data
    }

    /// A new wrapper with `extra` bound on top of this one's data.
    pub fn prerender(&self, extra: &Data) -> Self {
        Self::with_data(
            Arc::clone(&self.template),
            self.headers.clone(),
            self.build_data(extra),
        )
    }

    /// Render with `extra` merged over the bound data.
    pub fn render(&self, extra: &Data) -> Result<Response> {
        let content = self.template.render(&self.build_data(extra))?;
        Ok(Response::new(content, self.headers.clone()))
    }
}
