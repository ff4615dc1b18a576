//! Expression IR.
//!
//! Expressions are immutable nodes stored in the design's expression arena
//! and shared by [`ExprId`]. Every node carries its result width and
//! signedness; operands are referenced by handle.

use crate::ids::{EventId, ExprId, MemoryId, ParamId, ScopeId, SignalId};
use serde::{Deserialize, Serialize};
use tessel_common::Logic;

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Bitwise NOT (`~`).
    Not,
    /// Arithmetic negation (`-`).
    Neg,
    /// Logical NOT (`!`).
    LogicNot,
    /// Reduction AND (`&`).
    RedAnd,
    /// Reduction NAND (`~&`).
    RedNand,
    /// Reduction OR (`|`).
    RedOr,
    /// Reduction NOR (`~|`).
    RedNor,
    /// Reduction XOR (`^`).
    RedXor,
    /// Reduction XNOR (`~^`).
    RedXnor,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Modulo (`%`).
    Mod,
    /// Exponentiation (`**`).
    Pow,
    /// Bitwise AND (`&`).
    And,
    /// Bitwise OR (`|`).
    Or,
    /// Bitwise XOR (`^`).
    Xor,
    /// Bitwise XNOR (`~^`).
    Xnor,
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    Ne,
    /// Case equality (`===`).
    CaseEq,
    /// Case inequality (`!==`).
    CaseNe,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
    /// Logical AND (`&&`).
    LogicAnd,
    /// Logical OR (`||`).
    LogicOr,
    /// Left shift (`<<`).
    Shl,
    /// Logical right shift (`>>`).
    Shr,
    /// Arithmetic right shift (`>>>`).
    Ashr,
}

impl BinaryOp {
    /// Returns `true` for operators whose result is a single truth bit.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::CaseEq
                | BinaryOp::CaseNe
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
        )
    }
}

/// The shape of an expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Four-state literal, least significant bit first.
    Number(Vec<Logic>),
    /// Unsigned integer literal.
    ULong(u64),
    /// Real literal.
    Real(f64),
    /// String literal.
    String(String),
    /// Reference to a whole signal.
    Signal(SignalId),
    /// Reference to a parameter's value.
    Param(ParamId),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// `{repeat{parts...}}`; `parts[0]` supplies the most significant bits.
    Concat {
        repeat: u32,
        parts: Vec<ExprId>,
    },
    /// Part select of `base` starting at bit `offset`, `width` bits wide.
    Select {
        base: ExprId,
        offset: Option<ExprId>,
    },
    /// Call of the user function defined by scope `def`.
    UserFunc {
        def: ScopeId,
        args: Vec<ExprId>,
    },
    /// Call of a system function such as `$clog2`.
    SysFunc {
        name: String,
        args: Vec<ExprId>,
    },
    /// `cond ? if_true : if_false`.
    Ternary {
        cond: ExprId,
        if_true: ExprId,
        if_false: ExprId,
    },
    /// One word of a memory.
    Memory {
        memory: MemoryId,
        index: ExprId,
    },
    /// Reference to a named event.
    Event(EventId),
    /// Reference to a scope, as in a system task argument.
    Scope(ScopeId),
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Result width in bits.
    pub width: u32,
    /// Result signedness.
    pub signed: bool,
    pub kind: ExprKind,
}

impl Expr {
    /// Creates an expression node.
    pub fn new(width: u32, signed: bool, kind: ExprKind) -> Self {
        Self {
            width,
            signed,
            kind,
        }
    }

    /// Returns the handles of this node's operands in evaluation order.
    pub fn operands(&self) -> Vec<ExprId> {
        match &self.kind {
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            ExprKind::Concat { parts, .. } => parts.clone(),
            ExprKind::Select { base, offset } => std::iter::once(*base).chain(*offset).collect(),
            ExprKind::UserFunc { args, .. } | ExprKind::SysFunc { args, .. } => args.clone(),
            ExprKind::Ternary {
                cond,
                if_true,
                if_false,
            } => vec![*cond, *if_true, *if_false],
            ExprKind::Memory { index, .. } => vec![*index],
            ExprKind::Number(_)
            | ExprKind::ULong(_)
            | ExprKind::Real(_)
            | ExprKind::String(_)
            | ExprKind::Signal(_)
            | ExprKind::Param(_)
            | ExprKind::Event(_)
            | ExprKind::Scope(_) => Vec::new(),
        }
    }
}
