//! Mapped providers: public filename in, response out.
//!
//! A [`MappedDataProvider`] exposes a fixed set of short, front-end friendly
//! filenames (`logo.png`) and maps each one to the internal identifier a
//! renderer understands (`demo/page/img/logo.png`). A filename that is not in
//! the mapping fails with [`MoldgateError::MappingMiss`] and the renderer is
//! never called; translating that to a not-found status is up to the caller.
//!
//! # Example
//!
//! ```no_run
//! use moldgate::provider::{Mapping, MoldDataProvider};
//! use moldgate::registry::{DirMoldRegistry, Registries};
//! use moldgate::render::MoldDataRenderer;
//!
//! let registries = Registries::new()
//!     .with_mold("mold", DirMoldRegistry::new().with_mold("demo/page", "/srv/molds/page"));
//! let provider = MoldDataProvider::new(
//!     Mapping::from([("logo.png", "demo/page/logo.png")]),
//!     MoldDataRenderer::from_registries(&registries)?,
//! );
//!
//! let response = provider.provide("logo.png")?;
//! println!("{}", response.headers());
//! # Ok::<(), moldgate::MoldgateError>(())
//! ```

use crate::error::{MoldgateError, Result};
use crate::render::{ArtifactRenderer, MoldDataRenderer, Render};
use crate::response::Response;
use std::collections::BTreeMap;

/// Immutable filename to identifier mapping. Lookups are exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: BTreeMap<String, String>,
}

impl Mapping {
    /// The identifier mapped to `filename`.
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(|s| s.as_str())
    }

    /// All public filenames, sorted.
    pub fn filenames(&self) -> Vec<&str> {
        self.entries.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Mapping {
    fn from(entries: [(&str, &str); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Serves a fixed mapping of public filenames through a renderer.
#[derive(Debug, Clone)]
pub struct MappedDataProvider<R> {
    mapping: Mapping,
    renderer: R,
}

/// Provider serving files out of molds.
pub type MoldDataProvider = MappedDataProvider<MoldDataRenderer>;

/// Provider serving packaged artifacts.
pub type ArtifactProvider = MappedDataProvider<ArtifactRenderer>;

impl<R: Render> MappedDataProvider<R> {
    pub fn new(mapping: Mapping, renderer: R) -> Self {
        Self { mapping, renderer }
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Return the response for a public filename.
    pub fn provide(&self, filename: &str) -> Result<Response> {
        let identifier = self
            .mapping
            .get(filename)
            .ok_or_else(|| MoldgateError::MappingMiss {
                filename: filename.to_string(),
            })?;
        tracing::debug!("Providing {} from {}", filename, identifier);
        self.renderer.render(identifier)
    }
}

impl<R: Render> Render for MappedDataProvider<R> {
    fn render(&self, filename: &str) -> Result<Response> {
        self.provide(filename)
    }
}
