//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::TesselConfig;
use std::path::Path;

/// The file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "tessel.toml";

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<TesselConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = load_config_from_str(&content)?;
    log::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Loads `<dir>/tessel.toml` if it exists, otherwise returns the defaults.
pub fn load_optional_config(dir: &Path) -> Result<TesselConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        load_config(&path)
    } else {
        Ok(TesselConfig::default())
    }
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<TesselConfig, ConfigError> {
    let config: TesselConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that every name fragment can appear in a VHDL identifier.
fn validate_config(config: &TesselConfig) -> Result<(), ConfigError> {
    check_identifier(
        "codegen.architecture_name",
        &config.codegen.architecture_name,
    )?;
    check_identifier("naming.lpm_prefix", &config.naming.lpm_prefix)?;
    check_identifier("naming.logic_prefix", &config.naming.logic_prefix)?;
    if config.naming.lpm_prefix == config.naming.logic_prefix {
        return Err(ConfigError::Invalid {
            field: "naming.logic_prefix",
            reason: "must differ from naming.lpm_prefix".to_string(),
        });
    }
    check_fragment("naming.output_suffix", &config.naming.output_suffix)?;
    if config.codegen.support_package.is_empty() {
        return Err(ConfigError::Invalid {
            field: "codegen.support_package",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match value.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => check_fragment(field, value),
        _ => Err(ConfigError::Invalid {
            field,
            reason: "must start with a letter".to_string(),
        }),
    }
}

fn check_fragment(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("contains characters not allowed in VHDL identifiers: `{value}`"),
        });
    }
    if value.contains("__") || (value.ends_with('_') && field != "naming.output_suffix") {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("has a doubled or trailing underscore: `{value}`"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, TesselConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[codegen]
support_package = "lib.support"
architecture_name = "rtl"
parallel = true
header = false

[naming]
lpm_prefix = "Dev"
logic_prefix = "Gate"
output_suffix = "_Q"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert!(config.codegen.parallel);
        assert_eq!(config.codegen.architecture_name, "rtl");
        assert_eq!(config.naming.lpm_output("mul1"), "Devmul1_Q");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = load_config_from_str("[naming]\nlpm_prefix = \"P\"\n").unwrap();
        assert_eq!(config.naming.lpm_prefix, "P");
        assert_eq!(config.naming.output_suffix, "_Out");
    }

    #[test]
    fn unknown_key_rejected() {
        let err = load_config_from_str("[codegen]\nthreads = 4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_prefix_rejected() {
        let err = load_config_from_str("[naming]\nlpm_prefix = \"9x\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "naming.lpm_prefix",
                ..
            }
        ));
    }

    #[test]
    fn clashing_prefixes_rejected() {
        let toml = "[naming]\nlpm_prefix = \"N\"\nlogic_prefix = \"N\"\n";
        assert!(load_config_from_str(toml).is_err());
    }

    #[test]
    fn suffix_with_dash_rejected() {
        let err = load_config_from_str("[naming]\noutput_suffix = \"-o\"\n").unwrap_err();
        assert!(err.to_string().contains("naming.output_suffix"));
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn optional_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_optional_config(dir.path()).unwrap();
        assert_eq!(config, TesselConfig::default());
    }

    #[test]
    fn optional_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[codegen]\nparallel = true\n",
        )
        .unwrap();
        assert!(load_optional_config(dir.path()).unwrap().codegen.parallel);
    }
}
