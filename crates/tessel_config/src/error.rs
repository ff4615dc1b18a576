//! Why a `tessel.toml` was rejected.

use std::path::PathBuf;

/// A configuration that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The text is not valid TOML, or has an unknown key or a wrong type.
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but cannot be used to build VHDL names.
    #[error("`{field}` {reason}")]
    Invalid {
        /// Dotted key, e.g. `naming.lpm_prefix`.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}
