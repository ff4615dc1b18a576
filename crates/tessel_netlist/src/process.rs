//! Behavioral processes.

use crate::ids::{ScopeId, StmtId};
use serde::{Deserialize, Serialize};

/// When a process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessKind {
    /// Runs once at time zero.
    Initial,
    /// Restarts whenever it finishes.
    Always,
}

/// An `initial` or `always` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub kind: ProcessKind,
    /// The scope the process was declared in.
    pub scope: ScopeId,
    /// The root statement.
    pub stmt: StmtId,
}
