//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Providers must reference a registry of the kind their loader needs
//! - Provider mappings must hold identifiers their loader can resolve
//! - The template registry, when defined, must be a mold registry
//! - Mold ids and scan namespaces must fit the `namespace/mold` shape

use crate::config::schema::{LoaderKind, MoldgateConfig, RegistryConfig};
use crate::error::{MoldgateError, Result};
use crate::loader::ArtifactRef;
use crate::registry::split_mold_id_path;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Provider name if error is provider-specific
    pub provider: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one.
pub fn validate_config(config: &MoldgateConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_mold_ids(config));
    errors.extend(validate_providers(config));
    errors.extend(validate_template_registry(config));

    errors
}

fn registry_kind_matches(registry: &RegistryConfig, loader: LoaderKind) -> bool {
    matches!(
        (registry, loader),
        (RegistryConfig::Mold { .. }, LoaderKind::Binary)
            | (RegistryConfig::Artifact { .. }, LoaderKind::Artifact)
    )
}

fn validate_providers(config: &MoldgateConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, provider) in &config.providers {
        let registry_name = provider.registry_name();
        match config.registries.get(registry_name) {
            None => errors.push(ValidationError {
                rule: "unknown-registry".to_string(),
                message: format!(
                    "Provider '{}' uses registry '{}' which does not exist",
                    name, registry_name
                ),
                provider: Some(name.clone()),
            }),
            Some(registry) if !registry_kind_matches(registry, provider.loader) => {
                errors.push(ValidationError {
                    rule: "registry-kind".to_string(),
                    message: format!(
                        "Provider '{}' needs a {} registry but '{}' is not one",
                        name,
                        match provider.loader {
                            LoaderKind::Binary => "mold",
                            LoaderKind::Artifact => "artifact",
                        },
                        registry_name
                    ),
                    provider: Some(name.clone()),
                })
            }
            Some(_) => {}
        }

        for (filename, identifier) in &provider.files {
            let problem = match provider.loader {
                LoaderKind::Binary => split_mold_id_path(identifier).err(),
                LoaderKind::Artifact => ArtifactRef::parse(identifier).err(),
            };
            if let Some(e) = problem {
                errors.push(ValidationError {
                    rule: "bad-identifier".to_string(),
                    message: format!("Provider '{}' maps '{}': {}", name, filename, e),
                    provider: Some(name.clone()),
                });
            }
        }
    }

    errors
}

/// A mold id must split off as the first two segments of a mold path.
fn is_mold_id(mold_id: &str) -> bool {
    matches!(
        split_mold_id_path(&format!("{}/_", mold_id)),
        Ok((id, _)) if id == mold_id
    )
}

fn validate_mold_ids(config: &MoldgateConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, registry) in &config.registries {
        let RegistryConfig::Mold { molds, scan } = registry else {
            continue;
        };
        for mold_id in molds.keys().filter(|id| !is_mold_id(id)) {
            errors.push(ValidationError {
                rule: "bad-mold-id".to_string(),
                message: format!(
                    "Registry '{}' defines mold '{}', which is not of the form 'namespace/mold'",
                    name, mold_id
                ),
                provider: None,
            });
        }
        for namespace in scan
            .keys()
            .filter(|ns| ns.is_empty() || ns.contains('/'))
        {
            errors.push(ValidationError {
                rule: "bad-mold-id".to_string(),
                message: format!(
                    "Registry '{}' scans into namespace '{}', which must be a single segment",
                    name, namespace
                ),
                provider: None,
            });
        }
    }

    errors
}

fn validate_template_registry(config: &MoldgateConfig) -> Vec<ValidationError> {
    let name = &config.settings.template_registry;
    match config.registries.get(name) {
        Some(RegistryConfig::Artifact { .. }) => vec![ValidationError {
            rule: "template-registry-kind".to_string(),
            message: format!("Template registry '{}' must be a mold registry", name),
            provider: None,
        }],
        _ => Vec::new(),
    }
}

/// Validate a configuration.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &MoldgateConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(MoldgateError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
