//! Configuration schema definitions for moldgate.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use crate::registry::{DEFAULT_ARTIFACT_REGISTRY, DEFAULT_MOLD_REGISTRY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure for moldgate.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoldgateConfig {
    /// Global settings
    pub settings: Settings,

    /// Named registries
    #[serde(default)]
    pub registries: BTreeMap<String, RegistryConfig>,

    /// Named mapped providers
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

/// Global settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mold registry the template engine reads templates from
    #[serde(default = "default_template_registry")]
    pub template_registry: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_registry: default_template_registry(),
        }
    }
}

fn default_template_registry() -> String {
    DEFAULT_MOLD_REGISTRY.to_string()
}

/// A registry definition, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RegistryConfig {
    /// Mold registry backed by directories.
    Mold {
        /// Explicit mold id to directory entries
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        molds: BTreeMap<String, PathBuf>,

        /// Namespace to directory; every subdirectory becomes a mold
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        scan: BTreeMap<String, PathBuf>,
    },

    /// Artifact registry backed by per-package directories.
    Artifact {
        /// Package name to artifact directory
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        packages: BTreeMap<String, PathBuf>,
    },
}

/// Which loader a provider serves through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    /// Files inside molds (`namespace/mold/path`)
    #[default]
    Binary,
    /// Packaged artifacts (`package:artifact`)
    Artifact,
}

impl LoaderKind {
    /// Registry name used when a provider does not name one.
    pub fn default_registry(self) -> &'static str {
        match self {
            LoaderKind::Binary => DEFAULT_MOLD_REGISTRY,
            LoaderKind::Artifact => DEFAULT_ARTIFACT_REGISTRY,
        }
    }
}

/// A mapped provider definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Loader to serve through
    pub loader: LoaderKind,

    /// Registry name (defaults per loader kind)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,

    /// Content type to use when none can be guessed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_mime: Option<String>,

    /// Extra extension to MIME type mappings
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mime_types: BTreeMap<String, String>,

    /// Public filename to internal identifier
    pub files: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// The registry this provider reads from.
    pub fn registry_name(&self) -> &str {
        self.registry
            .as_deref()
            .unwrap_or_else(|| self.loader.default_registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
settings:
  template_registry: templates
registries:
  mold:
    kind: mold
    molds:
      demo/page: molds/page
    scan:
      demo.widgets: molds/widgets
  artifacts:
    kind: artifact
    packages:
      demo.pkg: dist
providers:
  static:
    files:
      logo.png: demo/page/logo.png
  bundles:
    loader: artifact
    unknown_mime: application/octet-stream
    mime_types:
      nja: text/plain
    files:
      app.js: demo.pkg:app.js
"#;
        let config: MoldgateConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.settings.template_registry, "templates");
        assert_eq!(config.registries.len(), 2);
        assert!(matches!(
            config.registries["mold"],
            RegistryConfig::Mold { ref molds, ref scan } if molds.len() == 1 && scan.len() == 1
        ));

        let static_files = &config.providers["static"];
        assert_eq!(static_files.loader, LoaderKind::Binary);
        assert_eq!(static_files.registry_name(), "mold");

        let bundles = &config.providers["bundles"];
        assert_eq!(bundles.loader, LoaderKind::Artifact);
        assert_eq!(bundles.registry_name(), "artifacts");
        assert_eq!(bundles.unknown_mime.as_deref(), Some("application/octet-stream"));
        assert_eq!(bundles.mime_types["nja"], "text/plain");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: MoldgateConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.registries.is_empty());
        assert!(config.providers.is_empty());
        assert_eq!(config.settings.template_registry, "mold");
    }

    #[test]
    fn unknown_registry_kind_is_rejected() {
        let yaml = r#"
registries:
  weird:
    kind: database
"#;
        assert!(serde_yaml::from_str::<MoldgateConfig>(yaml).is_err());
    }

    #[test]
    fn explicit_registry_overrides_default() {
        let provider = ProviderConfig {
            registry: Some("other".to_string()),
            ..Default::default()
        };
        assert_eq!(provider.registry_name(), "other");
    }
}
