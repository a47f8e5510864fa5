//! Build registries and providers from configuration.

use crate::config::schema::{LoaderKind, MoldgateConfig, ProviderConfig, RegistryConfig};
use crate::error::{MoldgateError, Result};
use crate::loader::{ArtifactLoader, BinaryLoader, Loader};
use crate::mime::MimeTypes;
use crate::provider::{Mapping, MappedDataProvider};
use crate::registry::{DirArtifactRegistry, DirMoldRegistry, Registries, RegistryHandle};
use crate::render::{JinjaEngine, LoaderRenderer, Render, UnknownMimeType};
use std::path::Path;
use std::sync::Arc;

/// Build every configured registry, resolving relative paths against
/// `base_dir`.
pub fn build_registries(config: &MoldgateConfig, base_dir: &Path) -> Result<Registries> {
    let mut registries = Registries::new();

    for (name, registry) in &config.registries {
        let handle = match registry {
            RegistryConfig::Mold { molds, scan } => {
                let mut molds_registry = DirMoldRegistry::new();
                for (namespace, dir) in scan {
                    molds_registry.scan(namespace, &base_dir.join(dir))?;
                }
                for (mold_id, dir) in molds {
                    molds_registry.insert(mold_id.clone(), base_dir.join(dir));
                }
                RegistryHandle::Mold(Arc::new(molds_registry))
            }
            RegistryConfig::Artifact { packages } => {
                let mut artifacts = DirArtifactRegistry::new();
                for (package_name, dir) in packages {
                    artifacts.insert(package_name.clone(), base_dir.join(dir));
                }
                RegistryHandle::Artifact(Arc::new(artifacts))
            }
        };
        tracing::debug!("Built {} '{}'", handle.capability(), name);
        registries.insert(name.clone(), handle);
    }

    Ok(registries)
}

/// Build the named provider.
pub fn build_provider(
    config: &MoldgateConfig,
    name: &str,
    registries: &Registries,
) -> Result<Box<dyn Render>> {
    let provider = config
        .providers
        .get(name)
        .ok_or_else(|| MoldgateError::ConfigValidationError {
            message: format!("Unknown provider '{}'", name),
        })?;

    let registry_name = provider.registry_name();
    let mapping: Mapping = provider
        .files
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let renderer: Box<dyn Render> = match provider.loader {
        LoaderKind::Binary => Box::new(MappedDataProvider::new(
            mapping,
            configure(
                BinaryLoader::from_registry(registries, registry_name)?,
                provider,
            ),
        )),
        LoaderKind::Artifact => Box::new(MappedDataProvider::new(
            mapping,
            configure(
                ArtifactLoader::from_registry(registries, registry_name)?,
                provider,
            ),
        )),
    };
    Ok(renderer)
}

fn configure<L>(loader: L, provider: &ProviderConfig) -> LoaderRenderer<L>
where
    L: Loader<Output = Vec<u8>>,
{
    let mimetypes = provider
        .mime_types
        .iter()
        .fold(MimeTypes::new(), |m, (ext, mime)| m.with_type(ext.as_str(), mime.as_str()));
    let unknown = match &provider.unknown_mime {
        Some(mime) => UnknownMimeType::Fallback(mime.clone()),
        None => UnknownMimeType::Omit,
    };

    LoaderRenderer::new(loader)
        .with_mime_types(mimetypes)
        .with_unknown_mime_type(unknown)
}

/// Build the template engine on the configured template registry.
pub fn build_engine(config: &MoldgateConfig, registries: &Registries) -> Result<JinjaEngine> {
    JinjaEngine::from_registry(registries, &config.settings.template_registry)
}
