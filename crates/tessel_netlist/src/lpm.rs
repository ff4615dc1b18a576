//! The LPM device catalog.
//!
//! An [`Lpm`] is a parameterized structural operator: adders, comparators,
//! multiplexers, part selects, concatenations, reductions, user function
//! calls, memory ports and storage elements. [`LpmKind`] is closed; each
//! variant carries exactly the geometry and nexus ports that kind needs.
//!
//! Pin numbering is derived from the variant: pin 0 is the output `q`,
//! pins `1..=size` are the data inputs in declared order, followed by the
//! select or address input where one exists, followed by the control
//! inputs of storage elements. [`Lpm::pins`] is the single source of that
//! numbering.

use crate::ids::{ExprId, MemoryId, NexusId, ScopeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tessel_common::Ident;

/// Arithmetic operator of an [`LpmKind::Arith`] device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mult,
    Divide,
    Modulo,
}

/// Relational operator of an [`LpmKind::Compare`] device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `===`
    CaseEq,
    /// `!==`
    CaseNe,
}

/// Reduction operator of an [`LpmKind::Reduce`] device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReduceOp {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

/// Direction of an [`LpmKind::Shift`] device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftDir {
    Left,
    Right,
}

/// Geometry shared by both part-select directions.
///
/// For a VP select, `data` is the wide source and `q` the `width`-bit
/// slice. For a PV select, `data` is the narrow value and `q` the wide
/// destination it is written into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSelect {
    /// Width of the selected slice.
    pub width: u32,
    /// Constant offset of the slice's least significant bit.
    pub base: u32,
    /// Signedness of the selected value.
    pub signed: bool,
    /// Output nexus.
    pub q: NexusId,
    /// Data input.
    pub data: NexusId,
    /// Dynamic offset; overrides `base` when present.
    pub offset: Option<NexusId>,
}

/// Edge-triggered register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipFlop {
    pub width: u32,
    pub q: NexusId,
    pub data: NexusId,
    pub clock: NexusId,
    pub enable: Option<NexusId>,
    pub async_clear: Option<NexusId>,
    pub async_set: Option<NexusId>,
    pub sync_clear: Option<NexusId>,
    pub sync_set: Option<NexusId>,
    /// Value loaded by the asynchronous set input.
    pub async_set_value: Option<ExprId>,
    /// Value loaded by the synchronous set input.
    pub sync_set_value: Option<ExprId>,
}

/// Memory write port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ram {
    pub memory: MemoryId,
    pub width: u32,
    pub q: NexusId,
    pub data: NexusId,
    pub address: NexusId,
    pub clock: Option<NexusId>,
    pub write_enable: Option<NexusId>,
}

/// Per-kind geometry and ports of an LPM device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LpmKind {
    /// Two-operand arithmetic; operands and result share `width`.
    Arith {
        op: ArithOp,
        width: u32,
        signed: bool,
        q: NexusId,
        a: NexusId,
        b: NexusId,
    },
    /// Two-operand comparison producing one bit; `width` is the operand width.
    Compare {
        op: CompareOp,
        width: u32,
        signed: bool,
        q: NexusId,
        a: NexusId,
        b: NexusId,
    },
    /// Shift of `data` by the unsigned amount on `distance`.
    Shift {
        dir: ShiftDir,
        width: u32,
        signed: bool,
        q: NexusId,
        data: NexusId,
        distance: NexusId,
    },
    /// `data.len()`-way multiplexer on a `select_width`-bit select.
    Mux {
        width: u32,
        select_width: u32,
        q: NexusId,
        data: Vec<NexusId>,
        select: NexusId,
    },
    /// Concatenation; `inputs[0]` supplies the least significant bits.
    Concat {
        width: u32,
        q: NexusId,
        inputs: Vec<NexusId>,
    },
    /// Reads a slice out of a vector.
    PartVp(PartSelect),
    /// Writes a value into a slice of a vector.
    PartPv(PartSelect),
    /// Reduction of a `width`-bit operand to one bit.
    Reduce {
        op: ReduceOp,
        width: u32,
        q: NexusId,
        data: NexusId,
    },
    /// Sign or zero extension to `width` bits, decided by `signed`.
    SignExt {
        width: u32,
        signed: bool,
        q: NexusId,
        data: NexusId,
    },
    /// `count` copies of `data`; `width` is the total output width.
    Repeat {
        width: u32,
        count: u32,
        q: NexusId,
        data: NexusId,
    },
    /// Call of a user function defined by scope `def`.
    UserFunc {
        def: ScopeId,
        width: u32,
        signed: bool,
        q: NexusId,
        args: Vec<NexusId>,
    },
    /// Combinational read of one memory word.
    Array {
        memory: MemoryId,
        width: u32,
        address_width: u32,
        q: NexusId,
        address: NexusId,
    },
    FlipFlop(FlipFlop),
    Ram(Ram),
}

/// Flat tag of an LPM device, used in diagnostics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LpmType {
    Add,
    Sub,
    Mult,
    Divide,
    Modulo,
    CmpEq,
    CmpNe,
    CmpGe,
    CmpGt,
    CmpEeq,
    CmpNee,
    ShiftL,
    ShiftR,
    Mux,
    Concat,
    PartVp,
    PartPv,
    ReAnd,
    ReNand,
    ReOr,
    ReNor,
    ReXor,
    ReXnor,
    SignExt,
    Repeat,
    UserFunc,
    Array,
    FlipFlop,
    Ram,
}

impl fmt::Display for LpmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LpmType::Add => "add",
            LpmType::Sub => "sub",
            LpmType::Mult => "mult",
            LpmType::Divide => "divide",
            LpmType::Modulo => "mod",
            LpmType::CmpEq => "cmp_eq",
            LpmType::CmpNe => "cmp_ne",
            LpmType::CmpGe => "cmp_ge",
            LpmType::CmpGt => "cmp_gt",
            LpmType::CmpEeq => "cmp_eeq",
            LpmType::CmpNee => "cmp_nee",
            LpmType::ShiftL => "shiftl",
            LpmType::ShiftR => "shiftr",
            LpmType::Mux => "mux",
            LpmType::Concat => "concat",
            LpmType::PartVp => "part_vp",
            LpmType::PartPv => "part_pv",
            LpmType::ReAnd => "re_and",
            LpmType::ReNand => "re_nand",
            LpmType::ReOr => "re_or",
            LpmType::ReNor => "re_nor",
            LpmType::ReXor => "re_xor",
            LpmType::ReXnor => "re_xnor",
            LpmType::SignExt => "sign_ext",
            LpmType::Repeat => "repeat",
            LpmType::UserFunc => "ufunc",
            LpmType::Array => "array",
            LpmType::FlipFlop => "ff",
            LpmType::Ram => "ram",
        };
        f.write_str(s)
    }
}

/// A structural operator instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lpm {
    /// Device basename, used to name its intermediate output.
    pub name: Ident,
    /// The declaring scope.
    pub scope: ScopeId,
    /// Kind, geometry and ports.
    pub kind: LpmKind,
}

impl Lpm {
    /// Returns the flat type tag.
    pub fn ty(&self) -> LpmType {
        match &self.kind {
            LpmKind::Arith { op, .. } => match op {
                ArithOp::Add => LpmType::Add,
                ArithOp::Sub => LpmType::Sub,
                ArithOp::Mult => LpmType::Mult,
                ArithOp::Divide => LpmType::Divide,
                ArithOp::Modulo => LpmType::Modulo,
            },
            LpmKind::Compare { op, .. } => match op {
                CompareOp::Eq => LpmType::CmpEq,
                CompareOp::Ne => LpmType::CmpNe,
                CompareOp::Ge => LpmType::CmpGe,
                CompareOp::Gt => LpmType::CmpGt,
                CompareOp::CaseEq => LpmType::CmpEeq,
                CompareOp::CaseNe => LpmType::CmpNee,
            },
            LpmKind::Shift { dir, .. } => match dir {
                ShiftDir::Left => LpmType::ShiftL,
                ShiftDir::Right => LpmType::ShiftR,
            },
            LpmKind::Mux { .. } => LpmType::Mux,
            LpmKind::Concat { .. } => LpmType::Concat,
            LpmKind::PartVp(_) => LpmType::PartVp,
            LpmKind::PartPv(_) => LpmType::PartPv,
            LpmKind::Reduce { op, .. } => match op {
                ReduceOp::And => LpmType::ReAnd,
                ReduceOp::Nand => LpmType::ReNand,
                ReduceOp::Or => LpmType::ReOr,
                ReduceOp::Nor => LpmType::ReNor,
                ReduceOp::Xor => LpmType::ReXor,
                ReduceOp::Xnor => LpmType::ReXnor,
            },
            LpmKind::SignExt { .. } => LpmType::SignExt,
            LpmKind::Repeat { .. } => LpmType::Repeat,
            LpmKind::UserFunc { .. } => LpmType::UserFunc,
            LpmKind::Array { .. } => LpmType::Array,
            LpmKind::FlipFlop(_) => LpmType::FlipFlop,
            LpmKind::Ram(_) => LpmType::Ram,
        }
    }

    /// Returns the width of the output `q`.
    ///
    /// Comparators and reductions produce a single bit. A PV select drives
    /// a slice of `width` bits into its destination.
    pub fn width(&self) -> u32 {
        match &self.kind {
            LpmKind::Compare { .. } | LpmKind::Reduce { .. } => 1,
            LpmKind::Arith { width, .. }
            | LpmKind::Shift { width, .. }
            | LpmKind::Mux { width, .. }
            | LpmKind::Concat { width, .. }
            | LpmKind::SignExt { width, .. }
            | LpmKind::Repeat { width, .. }
            | LpmKind::UserFunc { width, .. }
            | LpmKind::Array { width, .. } => *width,
            LpmKind::PartVp(p) | LpmKind::PartPv(p) => p.width,
            LpmKind::FlipFlop(ff) => ff.width,
            LpmKind::Ram(ram) => ram.width,
        }
    }

    /// Returns the signedness of the output `q`.
    pub fn signed(&self) -> bool {
        match &self.kind {
            LpmKind::Arith { signed, .. }
            | LpmKind::Shift { signed, .. }
            | LpmKind::SignExt { signed, .. }
            | LpmKind::UserFunc { signed, .. } => *signed,
            LpmKind::PartVp(p) | LpmKind::PartPv(p) => p.signed,
            _ => false,
        }
    }

    /// Returns the output nexus.
    pub fn q(&self) -> NexusId {
        match &self.kind {
            LpmKind::Arith { q, .. }
            | LpmKind::Compare { q, .. }
            | LpmKind::Shift { q, .. }
            | LpmKind::Mux { q, .. }
            | LpmKind::Concat { q, .. }
            | LpmKind::Reduce { q, .. }
            | LpmKind::SignExt { q, .. }
            | LpmKind::Repeat { q, .. }
            | LpmKind::UserFunc { q, .. }
            | LpmKind::Array { q, .. } => *q,
            LpmKind::PartVp(p) | LpmKind::PartPv(p) => p.q,
            LpmKind::FlipFlop(ff) => ff.q,
            LpmKind::Ram(ram) => ram.q,
        }
    }

    /// Returns the data inputs in declared order.
    pub fn data(&self) -> Vec<NexusId> {
        match &self.kind {
            LpmKind::Arith { a, b, .. } | LpmKind::Compare { a, b, .. } => vec![*a, *b],
            LpmKind::Shift { data, distance, .. } => vec![*data, *distance],
            LpmKind::Mux { data, .. } => data.clone(),
            LpmKind::Concat { inputs, .. } => inputs.clone(),
            LpmKind::PartVp(p) | LpmKind::PartPv(p) => {
                let mut v = vec![p.data];
                v.extend(p.offset);
                v
            }
            LpmKind::Reduce { data, .. }
            | LpmKind::SignExt { data, .. }
            | LpmKind::Repeat { data, .. } => vec![*data],
            LpmKind::UserFunc { args, .. } => args.clone(),
            LpmKind::Array { .. } => Vec::new(),
            LpmKind::FlipFlop(ff) => vec![ff.data],
            LpmKind::Ram(ram) => vec![ram.data],
        }
    }

    /// Returns the `n`th data input.
    pub fn data_at(&self, n: usize) -> Option<NexusId> {
        self.data().get(n).copied()
    }

    /// Returns the number of data inputs.
    pub fn size(&self) -> usize {
        self.data().len()
    }

    /// Returns the select or address input, if the kind has one.
    pub fn select(&self) -> Option<NexusId> {
        match &self.kind {
            LpmKind::Mux { select, .. } => Some(*select),
            LpmKind::Array { address, .. } => Some(*address),
            LpmKind::Ram(ram) => Some(ram.address),
            _ => None,
        }
    }

    /// Returns the control inputs of storage elements, in pin order.
    pub fn controls(&self) -> Vec<NexusId> {
        match &self.kind {
            LpmKind::FlipFlop(ff) => std::iter::once(ff.clock)
                .chain(ff.enable)
                .chain(ff.async_clear)
                .chain(ff.async_set)
                .chain(ff.sync_clear)
                .chain(ff.sync_set)
                .collect(),
            LpmKind::Ram(ram) => ram.clock.into_iter().chain(ram.write_enable).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns every port's nexus indexed by pin number.
    pub fn pins(&self) -> Vec<NexusId> {
        let mut pins = vec![self.q()];
        pins.extend(self.data());
        pins.extend(self.select());
        pins.extend(self.controls());
        pins
    }

    /// Returns the nexus on pin `pin`.
    pub fn pin(&self, pin: u32) -> Option<NexusId> {
        self.pins().get(pin as usize).copied()
    }
}
