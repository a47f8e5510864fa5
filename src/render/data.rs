//! Renderers for raw data served straight from a loader.

use crate::error::Result;
use crate::loader::{ArtifactLoader, BinaryLoader, Loader};
use crate::mime::MimeTypes;
use crate::registry::Registries;
use crate::render::Render;
use crate::response::{Headers, Response};

/// What to put in `Content-type` when the MIME guess finds nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnknownMimeType {
    /// Leave the header out.
    #[default]
    Omit,
    /// Use this content type instead.
    Fallback(String),
}

/// Serves whatever a loader returns, labelled with a guessed MIME type.
#[derive(Debug, Clone)]
pub struct LoaderRenderer<L> {
    loader: L,
    mimetypes: MimeTypes,
    unknown: UnknownMimeType,
}

/// Serves files out of molds.
pub type MoldDataRenderer = LoaderRenderer<BinaryLoader>;

/// Serves packaged artifacts.
pub type ArtifactRenderer = LoaderRenderer<ArtifactLoader>;

impl<L> LoaderRenderer<L>
where
    L: Loader<Output = Vec<u8>>,
{
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            mimetypes: MimeTypes::new(),
            unknown: UnknownMimeType::default(),
        }
    }

    /// Use a custom MIME table.
    pub fn with_mime_types(mut self, mimetypes: MimeTypes) -> Self {
        self.mimetypes = mimetypes;
        self
    }

    /// Choose what happens when no MIME type can be guessed.
    pub fn with_unknown_mime_type(mut self, unknown: UnknownMimeType) -> Self {
        self.unknown = unknown;
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl LoaderRenderer<BinaryLoader> {
    /// Serve from the default mold registry.
    pub fn from_registries(registries: &Registries) -> Result<Self> {
        Ok(Self::new(BinaryLoader::new(registries)?))
    }
}

impl LoaderRenderer<ArtifactLoader> {
    /// Serve from the default artifact registry.
    pub fn from_registries(registries: &Registries) -> Result<Self> {
        Ok(Self::new(ArtifactLoader::new(registries)?))
    }
}

impl<L> Render for LoaderRenderer<L>
where
    L: Loader<Output = Vec<u8>>,
{
    fn render(&self, identifier: &str) -> Result<Response> {
        let mimetype = self.mimetypes.guess_type(identifier).or_else(|| match &self.unknown {
            UnknownMimeType::Omit => None,
            UnknownMimeType::Fallback(mime) => Some(mime.clone()),
        });
        let content = self.loader.load(identifier)?;

        let mut headers = Headers::new();
        if let Some(mimetype) = mimetype {
            headers.insert("Content-type", mimetype);
        }
        tracing::debug!(
            "Serving {} ({} bytes, {})",
            identifier,
            content.len(),
            headers.get("Content-type").unwrap_or("no content type")
        );
        Ok(Response::new(content, headers))
    }
}
