//! Errors raised while lowering one device or expression.

use thiserror::Error;

/// A localized lowering failure.
///
/// The driver turns each into a diagnostic for the offending device and
/// carries on with its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    /// The construct has no VHDL rendering.
    #[error("unsupported {what} `{kind}`")]
    Unsupported { what: &'static str, kind: String },

    /// An operand could not be resolved to anything declared.
    #[error("unresolved reference: {0}")]
    Unresolved(String),

    /// A constant part select reaches past the end of its source.
    #[error("part select [{high}:{low}] is outside the {width}-bit source")]
    SliceOutOfRange { low: u64, high: u64, width: u32 },
}

impl LowerError {
    pub(crate) fn unsupported(what: &'static str, kind: impl ToString) -> Self {
        LowerError::Unsupported {
            what,
            kind: kind.to_string(),
        }
    }
}
