//! Configuration loading, parsing, validation and composition.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Building registries, providers and the template engine in [`compose`]
//!
//! # Example
//!
//! ```
//! use moldgate::config::{build_registries, parse_config, validate};
//! use moldgate::registry::Capability;
//! use std::path::Path;
//!
//! let config = parse_config(
//!     "registries:\n  mold:\n    kind: mold\n    molds:\n      demo/page: molds/page\n",
//!     Path::new("moldgate.yml"),
//! )
//! .unwrap();
//! validate(&config).unwrap();
//!
//! let registries = build_registries(&config, Path::new("/srv/site")).unwrap();
//! assert!(registries.get_registry("mold", Capability::Mold).is_ok());
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <path>` or `$MOLDGATE_CONFIG`
//! 2. `moldgate.yml` / `moldgate.yaml` in the working directory
//! 3. `.moldgate/config.yml` in the working directory

pub mod compose;
pub mod loader;
pub mod schema;
pub mod validator;

pub use compose::{build_engine, build_provider, build_registries};
pub use loader::{base_dir, find_config, load_config_file, parse_config, CONFIG_ENV};
pub use schema::{LoaderKind, MoldgateConfig, ProviderConfig, RegistryConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
