//! Error types for moldgate operations.
//!
//! This module defines [`MoldgateError`], the error type returned by every
//! registry lookup, loader, renderer and provider, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Configuration and identifier-format errors are raised eagerly with a
//!   constructed message, before any registry is asked for anything
//! - Resolution, I/O and mapping-miss errors propagate unchanged
//! - Nothing here maps errors to transport status codes; hosting layers use
//!   [`MoldgateError::is_not_found`] to make that call themselves

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moldgate operations.
#[derive(Debug, Error)]
pub enum MoldgateError {
    /// A named registry is missing or does not provide the expected
    /// capability.
    #[error("'{name}' does not resolve to a {expected}, got {found} instead")]
    Registry {
        name: String,
        expected: String,
        found: String,
    },

    /// A compound identifier could not be split into its parts.
    #[error("'{identifier}' is an invalid reference to a package artifact; it must be in the form of '{expected}'")]
    InvalidIdentifier {
        identifier: String,
        expected: String,
    },

    /// A mold id path is malformed (too few segments, or escapes the mold).
    #[error("Invalid mold path '{path}': {message}")]
    InvalidMoldPath { path: String, message: String },

    /// The mold registry has no mold under this id.
    #[error("Unknown mold: {mold_id}")]
    UnknownMold { mold_id: String },

    /// The artifact registry has no artifact for this package.
    #[error("Unknown artifact '{artifact_name}' for package '{package_name}'")]
    UnknownArtifact {
        package_name: String,
        artifact_name: String,
    },

    /// A mapped provider has no entry for the requested filename.
    #[error("No mapping for '{filename}'")]
    MappingMiss { filename: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Template engine failure (syntax, missing template, render error).
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MoldgateError {
    /// Whether this error means "the requested resource does not exist".
    ///
    /// Covers mapping misses, unknown molds and artifacts, missing
    /// templates and missing files.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::MappingMiss { .. } | Self::UnknownMold { .. } | Self::UnknownArtifact { .. } => {
                true
            }
            Self::Template(e) => e.kind() == minijinja::ErrorKind::TemplateNotFound,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias for moldgate operations.
pub type Result<T> = std::result::Result<T, MoldgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_names_registry_and_capability() {
        let err = MoldgateError::Registry {
            name: "nunja.mold".into(),
            expected: "mold registry".into(),
            found: "nothing".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("nunja.mold"));
        assert!(msg.contains("mold registry"));
        assert!(msg.contains("nothing"));
    }

    #[test]
    fn invalid_identifier_displays_shape() {
        let err = MoldgateError::InvalidIdentifier {
            identifier: "noseparator".into(),
            expected: "{package_name}:{artifact_name}".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'noseparator'"));
        assert!(msg.contains("{package_name}:{artifact_name}"));
    }

    #[test]
    fn unknown_artifact_displays_both_parts() {
        let err = MoldgateError::UnknownArtifact {
            package_name: "demo.pkg".into(),
            artifact_name: "bundle.js".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("demo.pkg"));
        assert!(msg.contains("bundle.js"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = MoldgateError::ConfigNotFound {
            path: PathBuf::from("/srv/moldgate.yml"),
        };
        assert!(err.to_string().contains("/srv/moldgate.yml"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MoldgateError = io_err.into();
        assert!(matches!(err, MoldgateError::Io(_)));
    }

    #[test]
    fn not_found_classification() {
        assert!(MoldgateError::MappingMiss {
            filename: "x.png".into()
        }
        .is_not_found());
        assert!(MoldgateError::UnknownMold {
            mold_id: "a/b".into()
        }
        .is_not_found());
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(MoldgateError::from(io_err).is_not_found());

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(!MoldgateError::from(denied).is_not_found());
        assert!(!MoldgateError::InvalidIdentifier {
            identifier: "x".into(),
            expected: "y".into(),
        }
        .is_not_found());
    }
}
