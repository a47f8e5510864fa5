//! Loaders: identifier in, path or bytes out.
//!
//! Every loader splits its work in two steps:
//! 1. [`Loader::resolve`] shapes the user-facing identifier into the
//!    arguments the registry call needs (and rejects malformed identifiers)
//! 2. [`Loader::invoke`] performs the registry call, plus any file read
//!
//! [`Loader::load`] runs both. Nothing is cached; each call re-resolves and
//! re-reads.
//!
//! # Example
//!
//! ```
//! use moldgate::loader::{ArtifactLoader, ArtifactRef, Loader};
//! use moldgate::registry::{DirArtifactRegistry, Registries};
//!
//! let registries = Registries::new()
//!     .with_artifact("artifacts", DirArtifactRegistry::new().with_package("demo", "/srv/dist"));
//! let loader = ArtifactLoader::new(&registries).unwrap();
//!
//! assert_eq!(
//!     loader.resolve("demo:bundle.js").unwrap(),
//!     ArtifactRef::new("demo", "bundle.js")
//! );
//! assert!(loader.resolve("bundle.js").is_err());
//! ```

use crate::error::{MoldgateError, Result};
use crate::registry::{
    ArtifactRegistry, Capability, MoldRegistry, Registries, RegistryHandle,
    DEFAULT_ARTIFACT_REGISTRY, DEFAULT_MOLD_REGISTRY,
};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// The shape every artifact reference must have.
pub const ARTIFACT_REF_FORMAT: &str = "{package_name}:{artifact_name}";

/// Extracts data from a registry for a given identifier.
pub trait Loader {
    /// Arguments produced by [`Loader::resolve`].
    type Args;

    /// What the loader returns.
    type Output;

    /// Convert the identifier into the arguments for [`Loader::invoke`].
    ///
    /// Loaders without a compound identifier format pass the identifier
    /// through untouched.
    fn resolve(&self, identifier: &str) -> Result<Self::Args>;

    /// Perform the registry call with resolved arguments.
    fn invoke(&self, args: Self::Args) -> Result<Self::Output>;

    /// Resolve then invoke.
    fn load(&self, identifier: &str) -> Result<Self::Output> {
        let args = self.resolve(identifier)?;
        self.invoke(args)
    }
}

/// A `{package_name}:{artifact_name}` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    pub package_name: String,
    pub artifact_name: String,
}

impl ArtifactRef {
    pub fn new(package_name: impl Into<String>, artifact_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            artifact_name: artifact_name.into(),
        }
    }

    /// Split an identifier on its first `:`.
    ///
    /// Any further colons stay part of the artifact name.
    pub fn parse(identifier: &str) -> Result<Self> {
        match identifier.split_once(':') {
            Some((package_name, artifact_name)) => Ok(Self::new(package_name, artifact_name)),
            None => Err(MoldgateError::InvalidIdentifier {
                identifier: identifier.to_string(),
                expected: ARTIFACT_REF_FORMAT.to_string(),
            }),
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package_name, self.artifact_name)
    }
}

/// Returns the filesystem path of a resource in a registry of any kind.
///
/// Mold registries take a mold id path; artifact registries take a
/// `package:artifact` reference, parsed before the registry is asked.
#[derive(Debug, Clone)]
pub struct RegistryPathLoader {
    registry: RegistryHandle,
}

impl RegistryPathLoader {
    /// Use whatever registry is registered under `registry_name`.
    pub fn from_registry(registries: &Registries, registry_name: &str) -> Result<Self> {
        Ok(Self::with_registry(
            registries.get_registry(registry_name, Capability::Any)?,
        ))
    }

    pub fn with_registry(registry: RegistryHandle) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }
}

impl Loader for RegistryPathLoader {
    type Args = String;
    type Output = PathBuf;

    fn resolve(&self, identifier: &str) -> Result<String> {
        Ok(identifier.to_string())
    }

    fn invoke(&self, identifier: String) -> Result<PathBuf> {
        let path = match &self.registry {
            RegistryHandle::Mold(registry) => registry.lookup_path(&identifier)?,
            RegistryHandle::Artifact(registry) => {
                let artifact = ArtifactRef::parse(&identifier)?;
                registry.get_artifact_filename(&artifact.package_name, &artifact.artifact_name)?
            }
        };
        tracing::debug!(
            "Resolved {} in {} to {}",
            identifier,
            self.registry.capability(),
            path.display()
        );
        Ok(path)
    }
}

/// Returns the filesystem path of a mold resource.
#[derive(Debug, Clone)]
pub struct MoldPathLoader {
    registry: Arc<dyn MoldRegistry>,
}

impl MoldPathLoader {
    /// Use the mold registry registered under the default name.
    pub fn new(registries: &Registries) -> Result<Self> {
        Self::from_registry(registries, DEFAULT_MOLD_REGISTRY)
    }

    /// Use the mold registry registered under `registry_name`.
    pub fn from_registry(registries: &Registries, registry_name: &str) -> Result<Self> {
        Ok(Self::with_registry(registries.mold(registry_name)?))
    }

    /// Use the given mold registry directly.
    pub fn with_registry(registry: Arc<dyn MoldRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying mold registry.
    pub fn registry(&self) -> &Arc<dyn MoldRegistry> {
        &self.registry
    }
}

impl Loader for MoldPathLoader {
    type Args = String;
    type Output = PathBuf;

    fn resolve(&self, identifier: &str) -> Result<String> {
        Ok(identifier.to_string())
    }

    fn invoke(&self, mold_id_path: String) -> Result<PathBuf> {
        let path = self.registry.lookup_path(&mold_id_path)?;
        tracing::debug!("Resolved {} to {}", mold_id_path, path.display());
        Ok(path)
    }
}

/// Returns the contents of a mold resource as bytes.
#[derive(Debug, Clone)]
pub struct BinaryLoader {
    paths: MoldPathLoader,
}

impl BinaryLoader {
    /// Use the mold registry registered under the default name.
    pub fn new(registries: &Registries) -> Result<Self> {
        Ok(Self {
            paths: MoldPathLoader::new(registries)?,
        })
    }

    /// Use the mold registry registered under `registry_name`.
    pub fn from_registry(registries: &Registries, registry_name: &str) -> Result<Self> {
        Ok(Self {
            paths: MoldPathLoader::from_registry(registries, registry_name)?,
        })
    }

    /// Use the given mold registry directly.
    pub fn with_registry(registry: Arc<dyn MoldRegistry>) -> Self {
        Self {
            paths: MoldPathLoader::with_registry(registry),
        }
    }
}

impl Loader for BinaryLoader {
    type Args = String;
    type Output = Vec<u8>;

    fn resolve(&self, identifier: &str) -> Result<String> {
        self.paths.resolve(identifier)
    }

    fn invoke(&self, mold_id_path: String) -> Result<Vec<u8>> {
        let path = self.paths.invoke(mold_id_path)?;
        let content = fs::read(&path)?;
        tracing::debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }
}

/// Returns a packaged artifact as bytes.
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    registry: Arc<dyn ArtifactRegistry>,
}

impl ArtifactLoader {
    /// Use the artifact registry registered under the default name.
    pub fn new(registries: &Registries) -> Result<Self> {
        Self::from_registry(registries, DEFAULT_ARTIFACT_REGISTRY)
    }

    /// Use the artifact registry registered under `registry_name`.
    pub fn from_registry(registries: &Registries, registry_name: &str) -> Result<Self> {
        Ok(Self::with_registry(registries.artifact(registry_name)?))
    }

    /// Use the given artifact registry directly.
    pub fn with_registry(registry: Arc<dyn ArtifactRegistry>) -> Self {
        Self { registry }
    }
}

impl Loader for ArtifactLoader {
    type Args = ArtifactRef;
    type Output = Vec<u8>;

    fn resolve(&self, identifier: &str) -> Result<ArtifactRef> {
        ArtifactRef::parse(identifier)
    }

    fn invoke(&self, artifact: ArtifactRef) -> Result<Vec<u8>> {
        let path = self
            .registry
            .get_artifact_filename(&artifact.package_name, &artifact.artifact_name)?;
        let content = fs::read(&path)?;
        tracing::debug!(
            "Read artifact {} ({} bytes) from {}",
            artifact,
            content.len(),
            path.display()
        );
        Ok(content)
    }
}
