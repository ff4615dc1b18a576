//! Configuration types deserialized from `tessel.toml`.

use serde::Deserialize;

/// The top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TesselConfig {
    /// Output layout and scheduling settings.
    pub codegen: CodegenConfig,
    /// Naming of synthesized intermediate signals.
    pub naming: NamingConfig,
}

/// Settings that control the shape of the generated VHDL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Library unit providing `Reduce_*`, `Ternary_*` and
    /// `Boolean_To_Logic`, emitted as a `use <package>.all;` clause.
    pub support_package: String,
    /// Architecture name used for every generated entity.
    pub architecture_name: String,
    /// Generate module scopes on a worker pool.
    pub parallel: bool,
    /// Emit the leading comment block.
    pub header: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            support_package: "work.Verilog_Support".to_string(),
            architecture_name: "FromVerilog".to_string(),
            parallel: false,
            header: true,
        }
    }
}

/// Naming of intermediates: `<prefix><device basename><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Prefix for signals driven by LPM devices.
    pub lpm_prefix: String,
    /// Prefix for signals driven by logic gates.
    pub logic_prefix: String,
    /// Suffix appended to every output intermediate.
    pub output_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            lpm_prefix: "LPM".to_string(),
            logic_prefix: "Logic".to_string(),
            output_suffix: "_Out".to_string(),
        }
    }
}

impl NamingConfig {
    /// Name of the intermediate carrying an LPM device's output.
    pub fn lpm_output(&self, basename: &str) -> String {
        format!("{}{basename}{}", self.lpm_prefix, self.output_suffix)
    }

    /// Name of the intermediate carrying a logic gate's output.
    pub fn logic_output(&self, basename: &str) -> String {
        format!("{}{basename}{}", self.logic_prefix, self.output_suffix)
    }
}
