//! Directory-backed artifact registry.

use crate::error::{MoldgateError, Result};
use crate::registry::ArtifactRegistry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Artifact registry mapping package names to their artifact directories.
///
/// Artifacts are plain files inside a package's directory; an artifact name
/// must be a single path component.
#[derive(Debug, Clone, Default)]
pub struct DirArtifactRegistry {
    packages: BTreeMap<String, PathBuf>,
}

impl DirArtifactRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package's artifact directory (builder style).
    pub fn with_package(mut self, package_name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.insert(package_name, dir);
        self
    }

    /// Register a package's artifact directory, replacing any previous entry.
    pub fn insert(&mut self, package_name: impl Into<String>, dir: impl Into<PathBuf>) {
        self.packages.insert(package_name.into(), dir.into());
    }

    /// The artifact directory registered for `package_name`.
    pub fn package_dir(&self, package_name: &str) -> Option<&Path> {
        self.packages.get(package_name).map(|p| p.as_path())
    }

    /// All registered package names, sorted.
    pub fn package_names(&self) -> Vec<&str> {
        self.packages.keys().map(|s| s.as_str()).collect()
    }
}

impl ArtifactRegistry for DirArtifactRegistry {
    fn get_artifact_filename(&self, package_name: &str, artifact_name: &str) -> Result<PathBuf> {
        let unknown = || MoldgateError::UnknownArtifact {
            package_name: package_name.to_string(),
            artifact_name: artifact_name.to_string(),
        };

        if artifact_name.is_empty()
            || artifact_name == "."
            || artifact_name == ".."
            || artifact_name.contains(['/', '\\'])
        {
            return Err(unknown());
        }

        let dir = self.packages.get(package_name).ok_or_else(unknown)?;
        Ok(dir.join(artifact_name))
    }
}
