//! Statement IR.
//!
//! Procedural statements are stored in the design's statement arena. They
//! are carried for processes and task/function bodies; structural code
//! generation only inspects them to report them.

use crate::ids::{EventId, ExprId, MemoryId, ScopeId, SignalId, StmtId};
use serde::{Deserialize, Serialize};

/// The target of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LvalTarget {
    /// A whole or part of a signal.
    Signal(SignalId),
    /// One word of a memory.
    Memory { memory: MemoryId, index: ExprId },
}

/// One part of an assignment's left-hand side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lval {
    /// Number of bits written.
    pub width: u32,
    /// Constant bit offset into the target.
    pub offset: u32,
    /// Dynamic bit offset, overriding `offset` when present.
    pub index: Option<ExprId>,
    pub target: LvalTarget,
}

/// Flavor of a case statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseKind {
    Case,
    /// `casex`: `x` and `z` are wildcards.
    CaseX,
    /// `casez`: `z` is a wildcard.
    CaseZ,
}

/// One arm of a case statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseArm {
    /// Match value; `None` for the `default` arm.
    pub guard: Option<ExprId>,
    pub body: StmtId,
}

/// A procedural statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// Blocking (`=`) or nonblocking (`<=`) assignment.
    Assign {
        lvals: Vec<Lval>,
        rval: ExprId,
        delay: Option<ExprId>,
        nonblocking: bool,
    },
    /// `begin`/`end` or `fork`/`join`, optionally named by a scope.
    Block {
        fork: bool,
        scope: Option<ScopeId>,
        stmts: Vec<StmtId>,
    },
    Case {
        kind: CaseKind,
        cond: ExprId,
        arms: Vec<CaseArm>,
    },
    /// `if`/`else`.
    Condit {
        cond: ExprId,
        then_stmt: Option<StmtId>,
        else_stmt: Option<StmtId>,
    },
    /// `#delay stmt` with a constant delay in simulation ticks.
    Delay { ticks: u64, stmt: StmtId },
    /// `#(expr) stmt`.
    DelayX { delay: ExprId, stmt: StmtId },
    Disable { scope: ScopeId },
    Forever { stmt: StmtId },
    Repeat { count: ExprId, stmt: StmtId },
    While { cond: ExprId, stmt: StmtId },
    /// System task call such as `$display`.
    SysTask { name: String, args: Vec<ExprId> },
    /// Call of the task defined by scope `def`.
    UserTask { def: ScopeId },
    /// `-> event`.
    Trigger { event: EventId },
    /// `@(events) stmt`.
    Wait { events: Vec<EventId>, stmt: StmtId },
    /// Procedural continuous `assign`.
    CAssign { lvals: Vec<Lval>, rval: ExprId },
    Deassign { lvals: Vec<Lval> },
    Force { lvals: Vec<Lval>, rval: ExprId },
    Release { lvals: Vec<Lval> },
    Noop,
}

impl Stmt {
    /// Returns the short keyword naming the statement kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Stmt::Assign {
                nonblocking: true, ..
            } => "assign_nb",
            Stmt::Assign { .. } => "assign",
            Stmt::Block { fork: true, .. } => "fork",
            Stmt::Block { .. } => "block",
            Stmt::Case { .. } => "case",
            Stmt::Condit { .. } => "condit",
            Stmt::Delay { .. } => "delay",
            Stmt::DelayX { .. } => "delayx",
            Stmt::Disable { .. } => "disable",
            Stmt::Forever { .. } => "forever",
            Stmt::Repeat { .. } => "repeat",
            Stmt::While { .. } => "while",
            Stmt::SysTask { .. } => "stask",
            Stmt::UserTask { .. } => "utask",
            Stmt::Trigger { .. } => "trigger",
            Stmt::Wait { .. } => "wait",
            Stmt::CAssign { .. } => "cassign",
            Stmt::Deassign { .. } => "deassign",
            Stmt::Force { .. } => "force",
            Stmt::Release { .. } => "release",
            Stmt::Noop => "noop",
        }
    }

    /// Returns the directly nested statements in execution order.
    pub fn children(&self) -> Vec<StmtId> {
        match self {
            Stmt::Block { stmts, .. } => stmts.clone(),
            Stmt::Case { arms, .. } => arms.iter().map(|a| a.body).collect(),
            Stmt::Condit {
                then_stmt,
                else_stmt,
                ..
            } => then_stmt.iter().chain(else_stmt).copied().collect(),
            Stmt::Delay { stmt, .. }
            | Stmt::DelayX { stmt, .. }
            | Stmt::Forever { stmt }
            | Stmt::Repeat { stmt, .. }
            | Stmt::While { stmt, .. }
            | Stmt::Wait { stmt, .. } => vec![*stmt],
            _ => Vec::new(),
        }
    }
}
