//! Renderers: identifier (plus data) in, [`Response`] out.
//!
//! - [`TemplateRenderer`] renders a template by id through a
//!   [`TemplateEngine`] and hands out staged [`TemplateRenderWrapper`]s
//! - [`MoldRenderer`] drives a [`MoldEngine`] (execute, render, shorthand
//!   template rendering) and builds full responses
//! - [`LoaderRenderer`] loads bytes through a [`Loader`](crate::loader::Loader)
//!   and labels them with a guessed MIME type
//!
//! Every response gets its own freshly built [`Headers`](crate::response::Headers).

pub mod data;
pub mod engine;
pub mod template;
pub mod wrapper;

pub use data::{ArtifactRenderer, LoaderRenderer, MoldDataRenderer, UnknownMimeType};
pub use engine::{JinjaEngine, MoldEngine, Template, TemplateEngine, MOLD_TEMPLATE};
pub use template::{MoldRenderer, TemplateRenderer};
pub use wrapper::TemplateRenderWrapper;

use crate::error::Result;
use crate::response::Response;
use std::sync::Arc;

/// Template data: string keys to JSON-like values.
pub type Data = serde_json::Map<String, serde_json::Value>;

/// Default content type for rendered templates.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Produces a response for an identifier.
pub trait Render {
    fn render(&self, identifier: &str) -> Result<Response>;
}

impl<R: Render + ?Sized> Render for &R {
    fn render(&self, identifier: &str) -> Result<Response> {
        (**self).render(identifier)
    }
}

impl<R: Render + ?Sized> Render for Box<R> {
    fn render(&self, identifier: &str) -> Result<Response> {
        (**self).render(identifier)
    }
}

impl<R: Render + ?Sized> Render for Arc<R> {
    fn render(&self, identifier: &str) -> Result<Response> {
        (**self).render(identifier)
    }
}

/// Build [`Data`] from key/value pairs.
///
/// ```
/// use moldgate::render::data_from;
///
/// let data = data_from([("title", "Hello")]);
/// assert_eq!(data["title"], "Hello");
/// ```
pub fn data_from<K, V, I>(pairs: I) -> Data
where
    K: Into<String>,
    V: Into<serde_json::Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
