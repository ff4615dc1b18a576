//! Errors that indicate a bug rather than a problem with the input.

use std::fmt;

/// Result of an operation that fails only on a broken internal invariant.
///
/// Problems with the design itself, such as an unsupported device, go to the
/// diagnostic sink instead and leave the operation `Ok`.
pub type TesselResult<T> = Result<T, InternalError>;

/// A broken invariant inside Tessel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal error{}: {message}", in_scope_suffix(.scope))]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
    /// Hierarchical path of the scope being processed, if known.
    pub scope: Option<String>,
}

impl InternalError {
    /// An error with no scope attached.
    pub fn new(message: impl Into<String>) -> Self {
        InternalError {
            message: message.into(),
            scope: None,
        }
    }

    /// Attaches the scope path, keeping one already set.
    pub fn in_scope(mut self, path: impl Into<String>) -> Self {
        self.scope.get_or_insert_with(|| path.into());
        self
    }
}

fn in_scope_suffix(scope: &Option<String>) -> String {
    scope.as_ref().map(|s| format!(" in `{s}`")).unwrap_or_default()
}

impl From<fmt::Error> for InternalError {
    fn from(_: fmt::Error) -> Self {
        InternalError::new("formatting into a string failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_scope() {
        let err = InternalError::new("port has no direction");
        assert_eq!(err.to_string(), "internal error: port has no direction");
        let err = err.in_scope("top.u0").in_scope("top");
        assert_eq!(err.to_string(), "internal error in `top.u0`: port has no direction");
    }
}
