//! Netlist locations that diagnostics are anchored to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in the elaborated design a diagnostic applies.
///
/// The back end has no source spans; it names the hierarchical scope path
/// and, when the problem concerns one object, that object's base name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Dot-separated hierarchical scope path, e.g. `top.u_alu`.
    pub scope: String,
    /// Base name of the device, signal, or process inside the scope.
    pub object: Option<String>,
}

impl Location {
    /// A location covering a whole scope.
    pub fn scope(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            object: None,
        }
    }

    /// A location naming one object inside a scope.
    pub fn object(scope: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            object: Some(object.into()),
        }
    }

    /// Returns `true` if the location carries no information.
    pub fn is_unknown(&self) -> bool {
        self.scope.is_empty() && self.object.is_none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Some(object) if self.scope.is_empty() => write!(f, "{object}"),
            Some(object) => write!(f, "{}.{object}", self.scope),
            None => write!(f, "{}", self.scope),
        }
    }
}
