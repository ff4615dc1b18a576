//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Formats diagnostics into output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders one line per diagnostic, optionally followed by its footnotes.
///
/// ```text
/// error[E301]: top.dff3: unsupported LPM kind `ff`
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes.
    pub color: bool,
    /// Whether to print notes and help lines after the header.
    pub footnotes: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, footnotes: bool) -> Self {
        Self { color, footnotes }
    }

    fn severity_label(&self, severity: Severity) -> String {
        if self.color {
            format!("{}{severity}\x1b[0m", severity.ansi())
        } else {
            severity.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}[{}]: ", self.severity_label(diag.severity), diag.code);
        if !diag.location.is_unknown() {
            out.push_str(&format!("{}: ", diag.location));
        }
        out.push_str(&diag.message);
        out.push('\n');

        if self.footnotes {
            for note in &diag.notes {
                out.push_str(&format!("   = note: {note}\n"));
            }
            for help in &diag.help {
                out.push_str(&format!("   = help: {help}\n"));
            }
        }
        out
    }
}
