//! Parsing and validation of `tessel.toml` code generation settings.
//!
//! Every field has a default, so a missing file and an empty file both yield
//! [`TesselConfig::default`], which reproduces the standard naming scheme
//! (`LPM<name>_Out`, `Logic<name>_Out`).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_optional_config, CONFIG_FILE_NAME};
pub use types::*;
