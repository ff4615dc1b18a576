//! A small VHDL syntax tree.
//!
//! Only the structural subset the lowering produces is modeled: typed
//! expressions, signal/constant/array-type declarations, concurrent signal
//! assignments, and entity/architecture pairs. Rendering lives in
//! [`crate::print`].

use crate::error::LowerError;
use tessel_common::Logic;

/// A VHDL type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VhdlType {
    StdLogic,
    /// `unsigned(w-1 downto 0)`
    Unsigned(u32),
    /// `signed(w-1 downto 0)`
    Signed(u32),
    Integer,
    Boolean,
    Real,
    /// A declared type such as a memory's array type.
    Named(String),
}

impl VhdlType {
    /// Returns the type used for a `width`-bit value.
    ///
    /// A single unsigned bit is `std_logic`; everything else is a
    /// `numeric_std` vector.
    pub fn for_width(width: u32, signed: bool) -> Self {
        if width == 1 && !signed {
            VhdlType::StdLogic
        } else {
            Self::vector(width, signed)
        }
    }

    /// Returns `signed(width)` or `unsigned(width)`.
    pub fn vector(width: u32, signed: bool) -> Self {
        if signed {
            VhdlType::Signed(width)
        } else {
            VhdlType::Unsigned(width)
        }
    }

    /// Returns the width in bits of a logic type.
    pub fn width(&self) -> Option<u32> {
        match self {
            VhdlType::StdLogic => Some(1),
            VhdlType::Unsigned(w) | VhdlType::Signed(w) => Some(*w),
            _ => None,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, VhdlType::Signed(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, VhdlType::Unsigned(_) | VhdlType::Signed(_))
    }

    /// Returns the type of a `width`-bit slice of a value of this type.
    pub fn slice(&self, width: u32) -> Self {
        if width == 1 {
            VhdlType::StdLogic
        } else {
            Self::vector(width, self.is_signed())
        }
    }
}

/// Binary operators. Operands are n-ary and associate left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Concat,
    And,
    Or,
    Xor,
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
}

impl BinOp {
    /// Returns the operator's VHDL spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mult => "*",
            BinOp::Div => "/",
            BinOp::Mod => "mod",
            BinOp::Concat => "&",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Xor => "xor",
            BinOp::Eq => "=",
            BinOp::Neq => "/=",
            BinOp::Lt => "<",
            BinOp::Leq => "<=",
            BinOp::Gt => ">",
            BinOp::Geq => ">=",
        }
    }

    /// Returns `true` for operators producing a `boolean`.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Neq | BinOp::Lt | BinOp::Leq | BinOp::Gt | BinOp::Geq
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Not,
    Neg,
}

/// A slice applied to a reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Slice {
    /// `name(index)`
    Index(Box<Expr>),
    /// `name(low + span downto low)`
    Range { low: Box<Expr>, span: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A signal, constant or memory reference, optionally sliced.
    Ref { name: String, slice: Option<Slice> },
    Int(i64),
    /// Bit string literal, least significant bit first.
    Bits(Vec<Logic>),
    /// Character literal such as `'1'`.
    Char(Logic),
    Real(f64),
    Binary { op: BinOp, operands: Vec<Expr> },
    Unary { op: UnOp, operand: Box<Expr> },
    Call { name: String, args: Vec<Expr> },
    /// `(0 => bit, others => '0')`
    BitSpec(Box<Expr>),
    /// `v0 when c0 else v1 when c1 else otherwise`
    Cond {
        branches: Vec<(Expr, Expr)>,
        otherwise: Box<Expr>,
    },
}

/// A typed VHDL expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: VhdlType,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: VhdlType) -> Self {
        Self { kind, ty }
    }

    /// An unsliced reference to `name`.
    pub fn reference(name: impl Into<String>, ty: VhdlType) -> Self {
        Self::new(
            ExprKind::Ref {
                name: name.into(),
                slice: None,
            },
            ty,
        )
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::Int(value), VhdlType::Integer)
    }

    /// A literal for `bits` (least significant first): a character literal
    /// for one unsigned bit, a bit string otherwise.
    pub fn bits(bits: &[Logic], signed: bool) -> Self {
        let ty = VhdlType::for_width(bits.len() as u32, signed);
        match (bits, &ty) {
            ([bit], VhdlType::StdLogic) => Self::new(ExprKind::Char(*bit), ty),
            _ => Self::new(ExprKind::Bits(bits.to_vec()), ty),
        }
    }

    /// A `width`-bit unsigned literal for `value`.
    pub fn unsigned_literal(value: u64, width: u32) -> Self {
        let bits: Vec<Logic> = (0..width)
            .map(|i| {
                if i < 64 && (value >> i) & 1 == 1 {
                    Logic::One
                } else {
                    Logic::Zero
                }
            })
            .collect();
        Self::bits(&bits, false)
    }

    pub fn binary(op: BinOp, operands: Vec<Expr>, ty: VhdlType) -> Self {
        Self::new(ExprKind::Binary { op, operands }, ty)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>, ty: VhdlType) -> Self {
        Self::new(
            ExprKind::Call {
                name: name.into(),
                args,
            },
            ty,
        )
    }

    /// Logical negation, keeping the operand's type.
    pub fn not(self) -> Self {
        let ty = self.ty.clone();
        Self::new(
            ExprKind::Unary {
                op: UnOp::Not,
                operand: Box::new(self),
            },
            ty,
        )
    }

    /// Returns `true` for an unsliced reference.
    pub fn is_plain_ref(&self) -> bool {
        matches!(self.kind, ExprKind::Ref { slice: None, .. })
    }

    /// Applies a slice to a reference, retyping it to `ty`.
    ///
    /// Returns `None` if the expression is not an unsliced reference, since
    /// VHDL can only slice names.
    pub fn with_slice(self, slice: Slice, ty: VhdlType) -> Option<Self> {
        match self.kind {
            ExprKind::Ref { name, slice: None } => Some(Self::new(
                ExprKind::Ref {
                    name,
                    slice: Some(slice),
                },
                ty,
            )),
            _ => None,
        }
    }

    /// Slices `width` bits starting at `low`: an index for one bit, a
    /// descending range otherwise.
    pub fn part(self, low: Expr, width: u32) -> Option<Self> {
        let ty = self.ty.slice(width);
        let slice = if width == 1 {
            Slice::Index(Box::new(low))
        } else {
            Slice::Range {
                low: Box::new(low),
                span: width - 1,
            }
        };
        self.with_slice(slice, ty)
    }

    /// Converts the expression to type `to`.
    pub fn cast(self, to: &VhdlType) -> Result<Expr, LowerError> {
        if self.ty == *to {
            return Ok(self);
        }
        if matches!(self.kind, ExprKind::Cond { .. }) {
            return self.cast_branches(to);
        }
        let unsupported = |from: &VhdlType| LowerError::Unsupported {
            what: "type conversion",
            kind: format!("{} to {}", from, to),
        };
        match (&self.ty, to) {
            (VhdlType::Unsigned(_) | VhdlType::Signed(_), VhdlType::Integer) => {
                Ok(Expr::call("To_Integer", vec![self], VhdlType::Integer))
            }
            (VhdlType::StdLogic, VhdlType::Integer) => {
                let test = Expr::binary(
                    BinOp::Eq,
                    vec![self, Expr::new(ExprKind::Char(Logic::One), VhdlType::StdLogic)],
                    VhdlType::Boolean,
                );
                Ok(Expr::call("Boolean'Pos", vec![test], VhdlType::Integer))
            }
            (VhdlType::Unsigned(_), VhdlType::Unsigned(w))
            | (VhdlType::Signed(_), VhdlType::Signed(w)) => self.resize(*w),
            (VhdlType::Unsigned(from), VhdlType::Signed(w)) => {
                let from = *from;
                Expr::call("Signed", vec![self], VhdlType::Signed(from)).resize(*w)
            }
            (VhdlType::Signed(from), VhdlType::Unsigned(w)) => {
                let from = *from;
                Expr::call("Unsigned", vec![self], VhdlType::Unsigned(from)).resize(*w)
            }
            (VhdlType::StdLogic, VhdlType::Unsigned(_) | VhdlType::Signed(_)) => Ok(Expr::new(
                ExprKind::BitSpec(Box::new(self)),
                to.clone(),
            )),
            (VhdlType::Unsigned(_) | VhdlType::Signed(_), VhdlType::StdLogic) => {
                if self.is_plain_ref() {
                    let from = self.ty.clone();
                    self.part(Expr::int(0), 1).ok_or_else(|| unsupported(&from))
                } else {
                    Err(unsupported(&self.ty))
                }
            }
            (VhdlType::Integer, VhdlType::Unsigned(w)) => Ok(Expr::call(
                "To_Unsigned",
                vec![self, Expr::int(i64::from(*w))],
                to.clone(),
            )),
            (VhdlType::Integer, VhdlType::Signed(w)) => Ok(Expr::call(
                "To_Signed",
                vec![self, Expr::int(i64::from(*w))],
                to.clone(),
            )),
            (VhdlType::Boolean, VhdlType::StdLogic) => Ok(Expr::call(
                "Boolean_To_Logic",
                vec![self],
                VhdlType::StdLogic,
            )),
            (VhdlType::StdLogic, VhdlType::Boolean) => Ok(Expr::binary(
                BinOp::Eq,
                vec![self, Expr::new(ExprKind::Char(Logic::One), VhdlType::StdLogic)],
                VhdlType::Boolean,
            )),
            (from, _) => Err(unsupported(from)),
        }
    }

    /// Converts each value of a conditional; VHDL cannot convert the
    /// conditional as a whole.
    fn cast_branches(self, to: &VhdlType) -> Result<Expr, LowerError> {
        match self.kind {
            ExprKind::Cond {
                branches,
                otherwise,
            } => {
                let branches = branches
                    .into_iter()
                    .map(|(cond, value)| Ok((cond, value.cast(to)?)))
                    .collect::<Result<Vec<_>, LowerError>>()?;
                let otherwise = Box::new(otherwise.cast(to)?);
                Ok(Expr::new(
                    ExprKind::Cond {
                        branches,
                        otherwise,
                    },
                    to.clone(),
                ))
            }
            kind => Expr::new(kind, self.ty).cast(to),
        }
    }

    /// Reinterprets a signed vector as unsigned of the same width. Other
    /// types pass through.
    pub fn unsigned(self) -> Result<Expr, LowerError> {
        match self.ty {
            VhdlType::Signed(w) if matches!(self.kind, ExprKind::Bits(_)) => {
                Ok(Expr::new(self.kind, VhdlType::Unsigned(w)))
            }
            VhdlType::Signed(w) => self.cast(&VhdlType::Unsigned(w)),
            _ => Ok(self),
        }
    }

    /// Adjusts the width of a logic value, sign-extending signed values and
    /// zero-extending unsigned ones.
    pub fn resize(self, width: u32) -> Result<Expr, LowerError> {
        match self.ty {
            VhdlType::Unsigned(w) | VhdlType::Signed(w) if w == width => Ok(self),
            VhdlType::Unsigned(_) | VhdlType::Signed(_) => {
                let ty = VhdlType::vector(width, self.ty.is_signed());
                Ok(Expr::call("Resize", vec![self, Expr::int(i64::from(width))], ty))
            }
            VhdlType::StdLogic if width == 1 => Ok(self),
            VhdlType::StdLogic | VhdlType::Integer => self.cast(&VhdlType::Unsigned(width)),
            _ => Err(LowerError::Unsupported {
                what: "resize of",
                kind: self.ty.to_string(),
            }),
        }
    }
}

/// Direction of an entity port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortMode {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub name: String,
    pub mode: PortMode,
    pub ty: VhdlType,
}

/// An architecture declarative item.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Signal {
        name: String,
        ty: VhdlType,
    },
    Constant {
        name: String,
        ty: VhdlType,
        value: Expr,
    },
    /// `type name is array (low to high) of element;`
    ArrayType {
        name: String,
        low: i64,
        high: i64,
        element: VhdlType,
    },
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Signal { name, .. }
            | Decl::Constant { name, .. }
            | Decl::ArrayType { name, .. } => name,
        }
    }
}

/// A concurrent signal assignment `target <= value;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub ports: Vec<Port>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Architecture {
    pub name: String,
    pub entity: String,
    pub decls: Vec<Decl>,
    pub stmts: Vec<Assign>,
}

/// One entity/architecture pair with its context clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Comment placed above the entity, naming the source scope.
    pub comment: Option<String>,
    pub uses: Vec<String>,
    pub entity: Entity,
    pub architecture: Architecture,
}
