//! Directory-backed mold registry.
//!
//! A mold id has the shape `namespace/mold_name`; a mold id path appends a
//! file path inside the mold: `namespace/mold_name/sub/dir/file.ext`.

use crate::error::{MoldgateError, Result};
use crate::registry::MoldRegistry;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Split a mold id path into its mold id and the path inside the mold.
///
/// ```
/// use moldgate::registry::split_mold_id_path;
///
/// let (mold_id, path) = split_mold_id_path("demo/page/img/logo.png").unwrap();
/// assert_eq!(mold_id, "demo/page");
/// assert_eq!(path, "img/logo.png");
/// ```
pub fn split_mold_id_path(mold_id_path: &str) -> Result<(&str, &str)> {
    let mut parts = mold_id_path.splitn(3, '/');
    let namespace = parts.next().unwrap_or_default();
    let mold_name = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();

    if namespace.is_empty() || mold_name.is_empty() || path.is_empty() {
        return Err(MoldgateError::InvalidMoldPath {
            path: mold_id_path.to_string(),
            message: "expected '{namespace}/{mold_name}/{path}'".to_string(),
        });
    }

    let mold_id = &mold_id_path[..namespace.len() + 1 + mold_name.len()];
    Ok((mold_id, path))
}

/// Mold registry mapping mold ids to directories on disk.
#[derive(Debug, Clone, Default)]
pub struct DirMoldRegistry {
    molds: BTreeMap<String, PathBuf>,
}

impl DirMoldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mold directory (builder style).
    pub fn with_mold(mut self, mold_id: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.insert(mold_id, dir);
        self
    }

    /// Register a mold directory, replacing any previous entry.
    pub fn insert(&mut self, mold_id: impl Into<String>, dir: impl Into<PathBuf>) {
        self.molds.insert(mold_id.into(), dir.into());
    }

    /// Register every subdirectory of `dir` as `namespace/<subdir>`.
    ///
    /// A missing directory registers nothing. Returns the number of molds
    /// added.
    pub fn scan(&mut self, namespace: &str, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            tracing::debug!("Mold directory {} does not exist", dir.display());
            return Ok(0);
        }

        let mut added = 0;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping mold directory with non UTF-8 name: {}", path.display());
                continue;
            };

            let mold_id = format!("{}/{}", namespace, name);
            tracing::debug!("Registered mold {} at {}", mold_id, path.display());
            self.molds.insert(mold_id, path.clone());
            added += 1;
        }

        Ok(added)
    }

    /// The directory registered for `mold_id`.
    pub fn mold_dir(&self, mold_id: &str) -> Option<&Path> {
        self.molds.get(mold_id).map(|p| p.as_path())
    }

    /// Check if a mold is registered.
    pub fn has(&self, mold_id: &str) -> bool {
        self.molds.contains_key(mold_id)
    }

    /// All registered mold ids, sorted.
    pub fn mold_ids(&self) -> Vec<&str> {
        self.molds.keys().map(|s| s.as_str()).collect()
    }
}

impl MoldRegistry for DirMoldRegistry {
    fn lookup_path(&self, mold_id_path: &str) -> Result<PathBuf> {
        let (mold_id, path) = split_mold_id_path(mold_id_path)?;

        if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(MoldgateError::InvalidMoldPath {
                path: mold_id_path.to_string(),
                message: "path segments must not be empty, '.' or '..'".to_string(),
            });
        }

        let base = self
            .molds
            .get(mold_id)
            .ok_or_else(|| MoldgateError::UnknownMold {
                mold_id: mold_id.to_string(),
            })?;

        Ok(path.split('/').fold(base.clone(), |acc, seg| acc.join(seg)))
    }
}
