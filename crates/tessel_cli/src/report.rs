//! Rendering of diagnostics to stderr.

use tessel_diagnostics::{Diagnostic, DiagnosticRenderer, Severity, TerminalRenderer};

use crate::{GlobalArgs, ReportFormat};

/// Counts of rendered diagnostics by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
}

/// Writes `diagnostics` to stderr in the requested format.
///
/// Generated VHDL may be going to stdout, so diagnostics never do.
pub fn report(diagnostics: &[Diagnostic], format: ReportFormat, global: &GlobalArgs) -> Summary {
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color, global.verbose);
            for diag in diagnostics {
                if global.quiet && diag.severity != Severity::Error {
                    continue;
                }
                eprintln!("{}", renderer.render(diag));
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string());
            eprintln!("{json}");
        }
    }
    summarize(diagnostics)
}

/// Counts errors and warnings.
pub fn summarize(diagnostics: &[Diagnostic]) -> Summary {
    let mut summary = Summary::default();
    for diag in diagnostics {
        match diag.severity {
            Severity::Error => summary.errors += 1,
            Severity::Warning => summary.warnings += 1,
            Severity::Note => {}
        }
    }
    summary
}
