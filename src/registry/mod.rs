//! Registries and the registry lookup facade.
//!
//! A registry maps identifiers in its own namespace to concrete resources on
//! the filesystem. Two capabilities exist:
//! - [`MoldRegistry`] turns a `mold_id_path` into a file path
//! - [`ArtifactRegistry`] turns a package name and artifact name into the
//!   packaged artifact's file path
//!
//! Registries are collected by logical name in a [`Registries`] value that is
//! built once at composition time and handed to loaders and renderers.
//! [`Registries::get_registry`] is the single place where "no such registry"
//! and "registry of the wrong kind" become a [`MoldgateError::Registry`].
//!
//! # Example
//!
//! ```
//! use moldgate::registry::{Capability, DirMoldRegistry, Registries};
//!
//! let registries = Registries::new()
//!     .with_mold("mold", DirMoldRegistry::new().with_mold("demo/page", "/srv/molds/page"));
//!
//! assert!(registries.get_registry("mold", Capability::Mold).is_ok());
//! assert!(registries.get_registry("mold", Capability::Artifact).is_err());
//! ```

pub mod artifact;
pub mod mold;

pub use artifact::DirArtifactRegistry;
pub use mold::{split_mold_id_path, DirMoldRegistry};

use crate::error::{MoldgateError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Logical name of the default mold registry.
pub const DEFAULT_MOLD_REGISTRY: &str = "mold";

/// Logical name of the default artifact registry.
pub const DEFAULT_ARTIFACT_REGISTRY: &str = "artifacts";

/// Resolves `mold_id_path` identifiers to filesystem paths.
pub trait MoldRegistry: fmt::Debug + Send + Sync {
    /// Translate a mold id path into a path on the filesystem.
    ///
    /// No file I/O is implied; the returned path may not exist.
    fn lookup_path(&self, mold_id_path: &str) -> Result<PathBuf>;
}

/// Resolves packaged artifacts by package and artifact name.
pub trait ArtifactRegistry: fmt::Debug + Send + Sync {
    /// Return the filename of the artifact built for `package_name`.
    fn get_artifact_filename(&self, package_name: &str, artifact_name: &str) -> Result<PathBuf>;
}

/// The kind of registry a caller expects to find under a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Any registry at all.
    Any,
    /// A [`MoldRegistry`].
    Mold,
    /// An [`ArtifactRegistry`].
    Artifact,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Any => write!(f, "registry"),
            Capability::Mold => write!(f, "mold registry"),
            Capability::Artifact => write!(f, "artifact registry"),
        }
    }
}

/// A registry stored under a logical name, tagged with its capability.
#[derive(Debug, Clone)]
pub enum RegistryHandle {
    /// Mold registry.
    Mold(Arc<dyn MoldRegistry>),
    /// Artifact registry.
    Artifact(Arc<dyn ArtifactRegistry>),
}

impl RegistryHandle {
    /// The capability this registry provides.
    pub fn capability(&self) -> Capability {
        match self {
            RegistryHandle::Mold(_) => Capability::Mold,
            RegistryHandle::Artifact(_) => Capability::Artifact,
        }
    }

    /// Check whether this registry satisfies `expected`.
    pub fn provides(&self, expected: Capability) -> bool {
        expected == Capability::Any || expected == self.capability()
    }
}

/// The registry of registries, keyed by logical name.
///
/// Read-only once built; cloning shares the underlying registries.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    entries: BTreeMap<String, RegistryHandle>,
}

impl Registries {
    /// Create an empty set of registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mold registry under `name`.
    pub fn with_mold(mut self, name: impl Into<String>, registry: impl MoldRegistry + 'static) -> Self {
        self.insert(name, RegistryHandle::Mold(Arc::new(registry)));
        self
    }

    /// Register an artifact registry under `name`.
    pub fn with_artifact(
        mut self,
        name: impl Into<String>,
        registry: impl ArtifactRegistry + 'static,
    ) -> Self {
        self.insert(name, RegistryHandle::Artifact(Arc::new(registry)));
        self
    }

    /// Register a handle under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, handle: RegistryHandle) {
        self.entries.insert(name.into(), handle);
    }

    /// Look up a registry by name without any capability check.
    pub fn get(&self, name: &str) -> Option<&RegistryHandle> {
        self.entries.get(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|s| s.as_str()).collect()
    }

    /// Look up a registry by name and check that it provides `expected`.
    ///
    /// Fails with [`MoldgateError::Registry`] when the name is unknown or
    /// the registry is of the wrong kind.
    pub fn get_registry(&self, name: &str, expected: Capability) -> Result<RegistryHandle> {
        tracing::debug!("Looking up {} '{}'", expected, name);
        match self.entries.get(name) {
            Some(handle) if handle.provides(expected) => Ok(handle.clone()),
            found => Err(registry_error(name, expected, found)),
        }
    }

    /// Look up a mold registry by name.
    pub fn mold(&self, name: &str) -> Result<Arc<dyn MoldRegistry>> {
        match self.get_registry(name, Capability::Mold)? {
            RegistryHandle::Mold(registry) => Ok(registry),
            other => Err(registry_error(name, Capability::Mold, Some(&other))),
        }
    }

    /// Look up an artifact registry by name.
    pub fn artifact(&self, name: &str) -> Result<Arc<dyn ArtifactRegistry>> {
        match self.get_registry(name, Capability::Artifact)? {
            RegistryHandle::Artifact(registry) => Ok(registry),
            other => Err(registry_error(name, Capability::Artifact, Some(&other))),
        }
    }
}

fn registry_error(name: &str, expected: Capability, found: Option<&RegistryHandle>) -> MoldgateError {
    MoldgateError::Registry {
        name: name.to_string(),
        expected: expected.to_string(),
        found: match found {
            Some(handle) => format!("a {}", handle.capability()),
            None => "nothing".to_string(),
        },
    }
}
