//! Configuration file discovery and loading.

use crate::config::schema::MoldgateConfig;
use crate::error::{MoldgateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "MOLDGATE_CONFIG";

/// Config file names searched in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["moldgate.yml", "moldgate.yaml", ".moldgate/config.yml"];

/// Find the config file to use.
///
/// An explicit path always wins (it is not checked here; loading reports a
/// missing file). Otherwise the first of [`CONFIG_FILE_NAMES`] that exists
/// under `start` is used.
pub fn find_config(explicit: Option<&Path>, start: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    CONFIG_FILE_NAMES
        .iter()
        .map(|name| start.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| MoldgateError::ConfigNotFound {
            path: start.join(CONFIG_FILE_NAMES[0]),
        })
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<MoldgateConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MoldgateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MoldgateError::Io(e)
        }
    })?;

    tracing::debug!("Loaded config from {}", path.display());
    parse_config(&content, path)
}

/// Parse YAML content into a [`MoldgateConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<MoldgateConfig> {
    serde_yaml::from_str(content).map_err(|e| MoldgateError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Directory that relative paths in the config at `path` are resolved
/// against.
pub fn base_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
