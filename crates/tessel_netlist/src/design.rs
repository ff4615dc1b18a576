//! Top-level design container.
//!
//! A [`Design`] owns every entity of one elaborated design. Entities refer
//! to each other through the typed handles in [`crate::ids`]; the design is
//! built once by a front end and read-only during code generation.

use crate::arena::Arena;
use crate::constant::Constant;
use crate::event::Event;
use crate::expr::Expr;
use crate::ids::{
    ConstId, EventId, ExprId, LogicId, LpmId, MemoryId, NexusId, ParamId, ProcessId, ScopeId,
    SignalId, StmtId,
};
use crate::logic::LogicGate;
use crate::lpm::Lpm;
use crate::memory::Memory;
use crate::nexus::Nexus;
use crate::param::Parameter;
use crate::process::Process;
use crate::scope::Scope;
use crate::signal::Signal;
use crate::stmt::Stmt;
use serde::{Deserialize, Serialize};

/// A complete elaborated design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Simulation time precision exponent (`-12` for ps).
    pub time_precision: i8,
    /// Root scopes in declaration order.
    pub roots: Vec<ScopeId>,
    pub scopes: Arena<ScopeId, Scope>,
    pub signals: Arena<SignalId, Signal>,
    pub nexuses: Arena<NexusId, Nexus>,
    pub lpms: Arena<LpmId, Lpm>,
    pub logic: Arena<LogicId, LogicGate>,
    /// The global constant pool.
    pub consts: Arena<ConstId, Constant>,
    pub memories: Arena<MemoryId, Memory>,
    pub events: Arena<EventId, Event>,
    pub params: Arena<ParamId, Parameter>,
    pub exprs: Arena<ExprId, Expr>,
    pub stmts: Arena<StmtId, Stmt>,
    pub processes: Arena<ProcessId, Process>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of scopes in the design.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}
