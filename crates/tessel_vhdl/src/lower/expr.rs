//! Lowering of netlist expressions.
//!
//! Only parameter values are lowered this way; they become VHDL constant
//! declarations. Each node is lowered to a value of
//! `for_width(width, signed)` so callers can cast the result like any
//! other operand.

use crate::ast::{BinOp, Expr, ExprKind, Slice, UnOp, VhdlType};
use crate::context::UnitContext;
use crate::error::LowerError;
use tessel_netlist::{self as netlist, BinaryOp, ExprId, NetlistView, UnaryOp};

/// Lowers the expression `id` to VHDL.
pub fn lower_expr<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    id: ExprId,
) -> Result<Expr, LowerError> {
    let node = ctx.view().expr(id);
    let ty = VhdlType::for_width(node.width, node.signed);
    match &node.kind {
        netlist::ExprKind::Number(bits) => Ok(Expr::bits(bits, node.signed)),
        netlist::ExprKind::ULong(value) => match i64::try_from(*value) {
            Ok(value) => Ok(Expr::int(value)),
            Err(_) => Ok(Expr::unsigned_literal(*value, node.width.max(64))),
        },
        netlist::ExprKind::Real(value) => Ok(Expr::new(ExprKind::Real(*value), VhdlType::Real)),
        netlist::ExprKind::Signal(signal) => Ok(ctx.signal_ref(*signal)),
        netlist::ExprKind::Param(param) => {
            let param = ctx.view().param(*param);
            let value = ctx.view().expr(param.value);
            let name = ctx.vhdl_name(param.name);
            Ok(Expr::reference(
                name,
                VhdlType::for_width(value.width, value.signed),
            ))
        }
        netlist::ExprKind::Unary { op, operand } => unary(ctx, *op, *operand, ty),
        netlist::ExprKind::Binary { op, lhs, rhs } => binary(ctx, *op, *lhs, *rhs, ty),
        netlist::ExprKind::Concat { repeat, parts } => {
            let mut lowered = Vec::with_capacity(parts.len());
            for &part in parts {
                lowered.push(lower_expr(ctx, part)?.unsigned()?);
            }
            if *repeat == 0 {
                return Err(LowerError::unsupported("repeat count", 0));
            }
            let once = lowered.clone();
            for _ in 1..*repeat {
                lowered.extend(once.iter().cloned());
            }
            if lowered.len() == 1 {
                return Ok(lowered.remove(0));
            }
            Ok(Expr::binary(BinOp::Concat, lowered, VhdlType::for_width(node.width, false)))
        }
        netlist::ExprKind::Select { base, offset } => {
            let source = lower_expr(ctx, *base)?;
            let low = match offset {
                Some(offset) => lower_expr(ctx, *offset)?.cast(&VhdlType::Integer)?,
                None => Expr::int(0),
            };
            let from = source.ty.clone();
            source
                .part(low, node.width)
                .ok_or_else(|| LowerError::unsupported("part select of", from))
        }
        netlist::ExprKind::UserFunc { def, args } => {
            let def_name = ctx.view().scope(*def).name;
            let name = ctx.vhdl_name(def_name);
            let mut lowered = Vec::with_capacity(args.len());
            for &arg in args {
                lowered.push(lower_expr(ctx, arg)?);
            }
            Ok(Expr::call(name, lowered, ty))
        }
        netlist::ExprKind::Memory { memory, index } => {
            let Some(name) = ctx.memory_name(*memory).map(str::to_string) else {
                let mem = ctx.view().memory(*memory);
                return Err(LowerError::Unresolved(format!(
                    "memory `{}` is not declared in `{}`",
                    ctx.name(mem.name),
                    ctx.path()
                )));
            };
            let index = lower_expr(ctx, *index)?.cast(&VhdlType::Integer)?;
            Ok(Expr::new(
                ExprKind::Ref {
                    name,
                    slice: Some(Slice::Index(Box::new(index))),
                },
                ty,
            ))
        }
        netlist::ExprKind::String(_) => Err(LowerError::unsupported("expression", "string")),
        netlist::ExprKind::SysFunc { name, .. } => {
            Err(LowerError::unsupported("system function", name))
        }
        netlist::ExprKind::Ternary {
            cond,
            if_true,
            if_false,
        } => {
            let test = truth(lower_expr(ctx, *cond)?)?;
            let if_true = lower_expr(ctx, *if_true)?.cast(&ty)?;
            let if_false = lower_expr(ctx, *if_false)?.cast(&ty)?;
            let func = match ty {
                VhdlType::StdLogic => "Ternary_Logic",
                VhdlType::Signed(_) => "Ternary_Signed",
                _ => "Ternary_Unsigned",
            };
            Ok(Expr::call(func, vec![test, if_true, if_false], ty))
        }
        netlist::ExprKind::Event(_) => Err(LowerError::unsupported("expression", "event")),
        netlist::ExprKind::Scope(_) => Err(LowerError::unsupported("expression", "scope")),
    }
}

fn unary<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    op: UnaryOp,
    operand: ExprId,
    ty: VhdlType,
) -> Result<Expr, LowerError> {
    let value = lower_expr(ctx, operand)?;
    let reduce = |name: &str, value: Expr| Expr::call(name, vec![value], VhdlType::StdLogic);
    Ok(match op {
        UnaryOp::Not => value.cast(&ty)?.not(),
        UnaryOp::Neg => {
            let ty = VhdlType::Signed(ty.width().unwrap_or(1));
            let value = value.cast(&ty)?;
            Expr::new(
                ExprKind::Unary {
                    op: UnOp::Neg,
                    operand: Box::new(value),
                },
                ty,
            )
        }
        UnaryOp::LogicNot => value
            .cast(&VhdlType::StdLogic)?
            .cast(&VhdlType::Boolean)?
            .not()
            .cast(&VhdlType::StdLogic)?,
        UnaryOp::RedAnd => reduce("Reduce_AND", value),
        UnaryOp::RedNand => reduce("Reduce_AND", value).not(),
        UnaryOp::RedOr => reduce("Reduce_OR", value),
        UnaryOp::RedNor => reduce("Reduce_OR", value).not(),
        UnaryOp::RedXor => reduce("Reduce_XOR", value),
        UnaryOp::RedXnor => reduce("Reduce_XNOR", value),
    })
}

fn binary<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    op: BinaryOp,
    lhs: ExprId,
    rhs: ExprId,
    ty: VhdlType,
) -> Result<Expr, LowerError> {
    let left = lower_expr(ctx, lhs)?;
    let right = lower_expr(ctx, rhs)?;

    if op.is_relational() {
        let operand_ty = wider(&left.ty, &right.ty);
        let operands = vec![left.cast(&operand_ty)?, right.cast(&operand_ty)?];
        let relop = match op {
            BinaryOp::Eq | BinaryOp::CaseEq => BinOp::Eq,
            BinaryOp::Ne | BinaryOp::CaseNe => BinOp::Neq,
            BinaryOp::Lt => BinOp::Lt,
            BinaryOp::Le => BinOp::Leq,
            BinaryOp::Gt => BinOp::Gt,
            _ => BinOp::Geq,
        };
        return Expr::binary(relop, operands, VhdlType::Boolean).cast(&VhdlType::StdLogic);
    }

    let bitwise = |op: BinOp, left: Expr, right: Expr| -> Result<Expr, LowerError> {
        Ok(Expr::binary(op, vec![left.cast(&ty)?, right.cast(&ty)?], ty.clone()))
    };
    match op {
        BinaryOp::Add => arith(BinOp::Add, left, right, &ty),
        BinaryOp::Sub => arith(BinOp::Sub, left, right, &ty),
        BinaryOp::Div => arith(BinOp::Div, left, right, &ty),
        BinaryOp::Mod => arith(BinOp::Mod, left, right, &ty),
        BinaryOp::Mul => {
            let width = ty.width().unwrap_or(1);
            let product = arith(BinOp::Mult, left, right, &ty)?;
            Ok(Expr::call(
                "Resize",
                vec![product, Expr::int(i64::from(width))],
                VhdlType::vector(width, ty.is_signed()),
            ))
        }
        BinaryOp::And => bitwise(BinOp::And, left, right),
        BinaryOp::Or => bitwise(BinOp::Or, left, right),
        BinaryOp::Xor => bitwise(BinOp::Xor, left, right),
        BinaryOp::Xnor => Ok(bitwise(BinOp::Xor, left, right)?.not()),
        BinaryOp::LogicAnd | BinaryOp::LogicOr => {
            let op = if op == BinaryOp::LogicAnd {
                BinOp::And
            } else {
                BinOp::Or
            };
            let truth = |e: Expr| e.cast(&VhdlType::StdLogic)?.cast(&VhdlType::Boolean);
            Expr::binary(op, vec![truth(left)?, truth(right)?], VhdlType::Boolean)
                .cast(&VhdlType::StdLogic)
        }
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::Ashr => {
            let shifted_ty = VhdlType::vector(ty.width().unwrap_or(1), op == BinaryOp::Ashr);
            let func = if op == BinaryOp::Shl {
                "shift_left"
            } else {
                "shift_right"
            };
            let call = Expr::call(
                func,
                vec![left.cast(&shifted_ty)?, right.cast(&VhdlType::Integer)?],
                shifted_ty,
            );
            call.cast(&VhdlType::vector(ty.width().unwrap_or(1), ty.is_signed()))
        }
        BinaryOp::Pow => Err(LowerError::unsupported("operator", "**")),
        _ => Err(LowerError::unsupported("operator", format!("{op:?}"))),
    }
}

fn arith(op: BinOp, left: Expr, right: Expr, ty: &VhdlType) -> Result<Expr, LowerError> {
    let ty = VhdlType::vector(ty.width().unwrap_or(1), ty.is_signed());
    Ok(Expr::binary(
        op,
        vec![left.cast(&ty)?, right.cast(&ty)?],
        ty,
    ))
}

/// A value as a VHDL condition: nonzero is true.
fn truth(value: Expr) -> Result<Expr, LowerError> {
    match value.ty.clone() {
        VhdlType::Boolean => Ok(value),
        VhdlType::StdLogic => value.cast(&VhdlType::Boolean),
        VhdlType::Integer | VhdlType::Unsigned(_) | VhdlType::Signed(_) => Ok(Expr::binary(
            BinOp::Neq,
            vec![value, Expr::int(0)],
            VhdlType::Boolean,
        )),
        other => Err(LowerError::unsupported("condition of type", other)),
    }
}

/// The common operand type of a comparison.
fn wider(a: &VhdlType, b: &VhdlType) -> VhdlType {
    match (a.width(), b.width()) {
        (Some(x), Some(y)) => VhdlType::vector(x.max(y), a.is_signed() && b.is_signed()),
        (Some(_), None) => a.clone(),
        _ => b.clone(),
    }
}
