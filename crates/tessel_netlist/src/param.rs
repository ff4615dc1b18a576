//! Parameters.

use crate::ids::{ExprId, ScopeId};
use serde::{Deserialize, Serialize};
use tessel_common::Ident;

/// A named compile-time constant of a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Ident,
    pub scope: ScopeId,
    /// The elaborated value.
    pub value: ExprId,
}
