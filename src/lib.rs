//! moldgate - resolve identifiers to mold files, packaged artifacts and
//! rendered templates, and hand them back as responses with MIME types.
//!
//! # Modules
//!
//! - [`registry`] - Named mold and artifact registries
//! - [`loader`] - Identifier resolution and loading
//! - [`render`] - Template engines and renderers producing responses
//! - [`provider`] - Public filename to identifier mapping
//! - [`response`] - Response content and headers
//! - [`mime`] - MIME type guessing
//! - [`config`] - Configuration loading, validation and composition
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use moldgate::loader::ArtifactRef;
//!
//! let artifact = ArtifactRef::parse("demo.pkg:app.js").unwrap();
//! assert_eq!(artifact.package_name, "demo.pkg");
//! assert_eq!(artifact.artifact_name, "app.js");
//! ```
//!
//! For file-backed registries and providers, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod mime;
pub mod provider;
pub mod registry;
pub mod render;
pub mod response;

pub use error::{MoldgateError, Result};
