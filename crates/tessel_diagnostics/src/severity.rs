//! How serious a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic. Orders from [`Note`](Self::Note) up.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Context attached to another problem.
    Note,
    /// Output was written but differs from the netlist, e.g. a renamed port.
    Warning,
    /// Some construct produced no output. The run fails.
    Error,
}

impl Severity {
    /// Lowercase name used in rendered output and JSON.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Bold ANSI color for terminal output.
    pub fn ansi(self) -> &'static str {
        match self {
            Severity::Note => "\x1b[1;36m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Error => "\x1b[1;31m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outrank_warnings() {
        assert!(Severity::Note < Severity::Warning);
        assert_eq!(Severity::Warning.max(Severity::Error), Severity::Error);
    }

    #[test]
    fn json_uses_label() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
