//! Diagnostic codes and helper functions for code generation.
//!
//! `E101` reports a design that fails structural validation. `E301`--`E303`
//! cover per-device lowering failures. `W301` flags renamed identifiers.

use crate::error::LowerError;
use tessel_diagnostics::{Category, Diagnostic, DiagnosticCode, Location};
use tessel_netlist::ValidateError;

/// Design violates a structural invariant.
pub const E101: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// Construct with no VHDL rendering.
pub const E301: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);

/// Operand that resolves to nothing declared in the unit.
pub const E302: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);

/// Constant part select outside its source.
pub const E303: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);

/// Netlist name that is not a legal VHDL identifier.
pub const W301: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);

/// Creates the diagnostic for a lowering failure.
pub fn error_lowering(err: &LowerError, location: Location) -> Diagnostic {
    match err {
        LowerError::Unsupported { .. } => Diagnostic::error(E301, err.to_string(), location),
        LowerError::Unresolved(_) => Diagnostic::error(E302, err.to_string(), location)
            .with_note("operands must be signals of the same scope, constants, or device outputs"),
        LowerError::SliceOutOfRange { .. } => Diagnostic::error(E303, err.to_string(), location),
    }
}

/// Creates a diagnostic for a construct the generator does not handle.
pub fn error_unsupported(what: &str, location: Location) -> Diagnostic {
    Diagnostic::error(E301, format!("unsupported {what}"), location)
}

/// Creates a diagnostic for a structural validation failure.
pub fn error_invalid_design(err: &ValidateError) -> Diagnostic {
    Diagnostic::error(E101, format!("invalid design: {err}"), Location::default())
        .with_help("the design file was produced by a faulty front end")
}

/// Creates a warning for a renamed identifier.
pub fn warning_renamed(original: &str, renamed: &str, location: Location) -> Diagnostic {
    Diagnostic::warning(
        W301,
        format!("`{original}` is not a legal VHDL identifier; renamed to `{renamed}`"),
        location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_diagnostics::Severity;
    use tessel_netlist::NexusId;

    #[test]
    fn codes_display() {
        assert_eq!(E301.to_string(), "E301");
        assert_eq!(W301.to_string(), "W301");
    }

    #[test]
    fn lowering_errors_map_to_codes() {
        let loc = Location::object("top", "dff3");
        let d = error_lowering(&LowerError::unsupported("LPM kind", "ff"), loc.clone());
        assert_eq!(d.code, E301);
        assert_eq!(d.message, "unsupported LPM kind `ff`");
        let d = error_lowering(&LowerError::Unresolved("x".into()), loc.clone());
        assert_eq!(d.code, E302);
        let d = error_lowering(
            &LowerError::SliceOutOfRange {
                low: 8,
                high: 11,
                width: 8,
            },
            loc,
        );
        assert_eq!(d.code, E303);
    }

    #[test]
    fn invalid_design_is_error() {
        let d = error_invalid_design(&ValidateError::EmptyNexus(NexusId::from_raw(0)));
        assert_eq!(d.severity, Severity::Error);
        assert!(d.message.contains("nexus#0"));
    }
}
