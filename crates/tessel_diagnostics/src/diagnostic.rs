//! The diagnostic record.

use crate::code::DiagnosticCode;
use crate::location::Location;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// One reported problem.
///
/// Rendered as a header line (`error[E301]: top.ff0: ...`) followed by the
/// footnotes. Empty footnote lists are left out of JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Stable code for filtering and tests.
    pub code: DiagnosticCode,
    /// One-line description, lowercase, no trailing period.
    pub message: String,
    /// Netlist object the problem concerns.
    pub location: Location,
    /// Background on why the problem arises.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// What the user can do about it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help: Vec<String>,
}

impl Diagnostic {
    /// An error at `location`.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, location: Location) -> Self {
        Diagnostic::with_severity(Severity::Error, code, message.into(), location)
    }

    /// A warning at `location`.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, location: Location) -> Self {
        Diagnostic::with_severity(Severity::Warning, code, message.into(), location)
    }

    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: String,
        location: Location,
    ) -> Self {
        Diagnostic {
            severity,
            code,
            message,
            location,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Appends a note footnote.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Appends a help footnote.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn constructors_set_severity() {
        let code = DiagnosticCode::new(Category::Error, 301);
        let diag = Diagnostic::error(code, "unsupported LPM kind `ff`", Location::scope("top"));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code.to_string(), "E301");

        let code = DiagnosticCode::new(Category::Warning, 301);
        let diag = Diagnostic::warning(code, "renamed `in` to `VL_in`", Location::default())
            .with_note("`in` is a VHDL reserved word")
            .with_help("rename the port in the source design");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.notes, ["`in` is a VHDL reserved word"]);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn json_omits_empty_footnotes() {
        let code = DiagnosticCode::new(Category::Error, 302);
        let diag = Diagnostic::error(code, "unresolved operand", Location::object("top", "mux0"));
        let json = serde_json::to_string(&diag).unwrap();
        assert!(!json.contains("notes"));
        assert!(json.contains("\"code\":\"E302\""));
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diag);
    }
}
