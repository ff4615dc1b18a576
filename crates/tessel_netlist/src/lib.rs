//! Tessel netlist IR: the elaborated design as seen by code generators.
//!
//! A [`Design`] is a forest of [`Scope`]s owning [`Signal`]s, [`LogicGate`]s,
//! [`Lpm`] devices, [`Memory`]s, [`Event`]s and [`Parameter`]s. Devices are
//! wired together through [`Nexus`]es; behavior is carried as [`Expr`] and
//! [`Stmt`] trees. Code generators read the design through [`NetlistView`].

pub mod arena;
pub mod builder;
pub mod constant;
pub mod design;
pub mod event;
pub mod expr;
pub mod file;
pub mod ids;
pub mod logic;
pub mod lpm;
pub mod memory;
pub mod nexus;
pub mod param;
pub mod process;
pub mod scope;
pub mod signal;
pub mod stmt;
pub mod validate;
pub mod view;

pub use arena::{Arena, ArenaId};
pub use builder::DesignBuilder;
pub use constant::{ConstValue, Constant};
pub use design::Design;
pub use event::Event;
pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use file::{load_design, parse_design, save_design, write_design, DesignFileError};
pub use ids::*;
pub use logic::{LogicGate, LogicType};
pub use lpm::{
    ArithOp, CompareOp, FlipFlop, Lpm, LpmKind, LpmType, PartSelect, Ram, ReduceOp, ShiftDir,
};
pub use memory::Memory;
pub use nexus::{DriveStrength, Nexus, NexusPin, PinOwner};
pub use param::Parameter;
pub use process::{Process, ProcessKind};
pub use scope::{Scope, ScopeItem, ScopeKind, ScopeWalk};
pub use signal::{DataType, PortDirection, Signal, SignalType};
pub use stmt::{CaseArm, CaseKind, Lval, LvalTarget, Stmt};
pub use validate::{validate, validate_all, ValidateError};
pub use view::NetlistView;
