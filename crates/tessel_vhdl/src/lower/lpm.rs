//! Lowering of LPM devices to VHDL expressions.
//!
//! Each device kind maps onto one expression over its resolved operands.
//! Operand resolution may declare intermediates in the unit as a side
//! effect; a failure leaves those declarations in place and reports the
//! device.

use crate::ast::{BinOp, Expr, ExprKind, Slice, VhdlType};
use crate::context::UnitContext;
use crate::error::LowerError;
use crate::nexus::nexus_to_ref;
use tessel_common::Ident;
use tessel_netlist::{
    ArithOp, CompareOp, LpmId, LpmKind, MemoryId, NetlistView, NexusId, PartSelect, ReduceOp,
    ShiftDir,
};

/// Lowers the device `id` to the expression for its output value.
pub fn lpm_to_expr<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    id: LpmId,
) -> Result<Expr, LowerError> {
    let lpm = ctx.view().lpm(id);
    log::trace!("{}: lowering {} `{}`", ctx.path(), lpm.ty(), ctx.name(lpm.name));
    match &lpm.kind {
        LpmKind::Arith {
            op,
            width,
            signed,
            a,
            b,
            ..
        } => arith(ctx, *op, *width, *signed, *a, *b),
        LpmKind::Compare {
            op,
            width,
            signed,
            a,
            b,
            ..
        } => compare(ctx, *op, *width, *signed, *a, *b),
        LpmKind::Shift {
            dir,
            width,
            signed,
            data,
            distance,
            ..
        } => shift(ctx, *dir, *width, *signed, *data, *distance),
        LpmKind::Mux {
            width,
            select_width,
            data,
            select,
            ..
        } => mux(ctx, *width, *select_width, data, *select),
        LpmKind::Concat { width, inputs, .. } => concat(ctx, *width, inputs),
        LpmKind::PartVp(part) => part_select_vp(ctx, part),
        LpmKind::PartPv(part) => nexus_to_ref(ctx, part.data),
        LpmKind::Reduce { op, data, .. } => reduction(ctx, *op, *data),
        LpmKind::SignExt { width, data, .. } => nexus_to_ref(ctx, *data)?.resize(*width),
        LpmKind::Repeat {
            width, count, data, ..
        } => repeat(ctx, *width, *count, *data),
        LpmKind::UserFunc {
            width,
            signed,
            args,
            ..
        } => user_func(ctx, lpm.name, *width, *signed, args),
        LpmKind::Array {
            memory, address, ..
        } => array_read(ctx, *memory, *address),
        LpmKind::FlipFlop(_) | LpmKind::Ram(_) => {
            Err(LowerError::unsupported("LPM kind", lpm.ty()))
        }
    }
}

/// Returns the low bit of a part select: the dynamic offset cast to
/// integer if the device has one, the constant base otherwise.
pub fn part_select_base<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    part: &PartSelect,
) -> Result<Expr, LowerError> {
    match part.offset {
        Some(offset) => nexus_to_ref(ctx, offset)?.cast(&VhdlType::Integer),
        None => Ok(Expr::int(i64::from(part.base))),
    }
}

fn operands<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    nexuses: &[NexusId],
    ty: &VhdlType,
) -> Result<Vec<Expr>, LowerError> {
    nexuses
        .iter()
        .map(|&n| nexus_to_ref(ctx, n)?.cast(ty))
        .collect()
}

fn arith<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    op: ArithOp,
    width: u32,
    signed: bool,
    a: NexusId,
    b: NexusId,
) -> Result<Expr, LowerError> {
    let ty = VhdlType::vector(width, signed);
    let operands = operands(ctx, &[a, b], &ty)?;
    let binop = match op {
        ArithOp::Add => BinOp::Add,
        ArithOp::Sub => BinOp::Sub,
        ArithOp::Mult => BinOp::Mult,
        ArithOp::Divide => BinOp::Div,
        ArithOp::Modulo => BinOp::Mod,
    };
    let expr = Expr::binary(binop, operands, ty.clone());
    if op == ArithOp::Mult {
        // numeric_std products are twice as wide as their operands.
        Ok(Expr::call(
            "Resize",
            vec![expr, Expr::int(i64::from(width))],
            ty,
        ))
    } else {
        Ok(expr)
    }
}

fn compare<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    op: CompareOp,
    width: u32,
    signed: bool,
    a: NexusId,
    b: NexusId,
) -> Result<Expr, LowerError> {
    let ty = VhdlType::for_width(width, signed);
    let operands = operands(ctx, &[a, b], &ty)?;
    let binop = match op {
        CompareOp::Eq | CompareOp::CaseEq => BinOp::Eq,
        CompareOp::Ne | CompareOp::CaseNe => BinOp::Neq,
        CompareOp::Ge => BinOp::Geq,
        CompareOp::Gt => BinOp::Gt,
    };
    Expr::binary(binop, operands, VhdlType::Boolean).cast(&VhdlType::StdLogic)
}

fn shift<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    dir: ShiftDir,
    width: u32,
    signed: bool,
    data: NexusId,
    distance: NexusId,
) -> Result<Expr, LowerError> {
    let ty = VhdlType::vector(width, signed);
    let value = nexus_to_ref(ctx, data)?.cast(&ty)?;
    let amount = nexus_to_ref(ctx, distance)?.cast(&VhdlType::Integer)?;
    let func = match dir {
        ShiftDir::Left => "shift_left",
        ShiftDir::Right => "shift_right",
    };
    Ok(Expr::call(func, vec![value, amount], ty))
}

/// `d0 when sel = "00" else d1 when sel = "01" else ... else dN`.
fn mux<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    width: u32,
    select_width: u32,
    data: &[NexusId],
    select: NexusId,
) -> Result<Expr, LowerError> {
    let ty = VhdlType::for_width(width, false);
    let mut values = operands(ctx, data, &ty)?;
    let Some(last) = values.pop() else {
        return Err(LowerError::unsupported("multiplexer", "with no inputs"));
    };
    if values.is_empty() {
        return Ok(last);
    }
    let select = nexus_to_ref(ctx, select)?;
    let branches = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let index = Expr::unsigned_literal(i as u64, select_width);
            let cond = Expr::binary(BinOp::Eq, vec![select.clone(), index], VhdlType::Boolean);
            (cond, value)
        })
        .collect();
    Ok(Expr::new(
        ExprKind::Cond {
            branches,
            otherwise: Box::new(last),
        },
        ty,
    ))
}

/// Inputs are joined most significant first, that is `N-1` down to `0`.
fn concat<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    width: u32,
    inputs: &[NexusId],
) -> Result<Expr, LowerError> {
    let mut parts = Vec::with_capacity(inputs.len());
    for &input in inputs.iter().rev() {
        parts.push(nexus_to_ref(ctx, input)?.unsigned()?);
    }
    Ok(Expr::binary(
        BinOp::Concat,
        parts,
        VhdlType::for_width(width, false),
    ))
}

fn part_select_vp<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    part: &PartSelect,
) -> Result<Expr, LowerError> {
    let source = nexus_to_ref(ctx, part.data)?;
    if part.offset.is_none() {
        let source_width = source.ty.width().unwrap_or(0);
        let high = u64::from(part.base) + u64::from(part.width) - 1;
        if high >= u64::from(source_width) {
            return Err(LowerError::SliceOutOfRange {
                low: u64::from(part.base),
                high,
                width: source_width,
            });
        }
    }
    let low = part_select_base(ctx, part)?;
    let ty = source.ty.clone();
    source
        .part(low, part.width)
        .ok_or_else(|| LowerError::unsupported("part select of", ty))
}

fn reduction<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    op: ReduceOp,
    data: NexusId,
) -> Result<Expr, LowerError> {
    let (func, invert) = match op {
        ReduceOp::And => ("Reduce_AND", false),
        ReduceOp::Nand => ("Reduce_AND", true),
        ReduceOp::Or => ("Reduce_OR", false),
        ReduceOp::Nor => ("Reduce_OR", true),
        ReduceOp::Xor => ("Reduce_XOR", false),
        ReduceOp::Xnor => ("Reduce_XNOR", false),
    };
    let operand = nexus_to_ref(ctx, data)?;
    let call = Expr::call(func, vec![operand], VhdlType::StdLogic);
    Ok(if invert { call.not() } else { call })
}

fn repeat<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    width: u32,
    count: u32,
    data: NexusId,
) -> Result<Expr, LowerError> {
    let operand = nexus_to_ref(ctx, data)?.unsigned()?;
    match count {
        0 => Err(LowerError::unsupported("repeat count", 0)),
        1 => Ok(operand),
        _ => Ok(Expr::binary(
            BinOp::Concat,
            vec![operand; count as usize],
            VhdlType::for_width(width, false),
        )),
    }
}

/// The callee is named after the calling device.
fn user_func<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    device: Ident,
    width: u32,
    signed: bool,
    args: &[NexusId],
) -> Result<Expr, LowerError> {
    let name = ctx.vhdl_name(device);
    let mut refs = Vec::with_capacity(args.len());
    for &arg in args {
        refs.push(nexus_to_ref(ctx, arg)?);
    }
    Ok(Expr::call(name, refs, VhdlType::for_width(width, signed)))
}

fn array_read<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    memory: MemoryId,
    address: NexusId,
) -> Result<Expr, LowerError> {
    let mem = ctx.view().memory(memory);
    let Some(name) = ctx.memory_name(memory).map(str::to_string) else {
        return Err(LowerError::Unresolved(format!(
            "memory `{}` is not declared in `{}`",
            ctx.name(mem.name),
            ctx.path()
        )));
    };
    let index = nexus_to_ref(ctx, address)?.cast(&VhdlType::Integer)?;
    Ok(Expr::new(
        ExprKind::Ref {
            name,
            slice: Some(Slice::Index(Box::new(index))),
        },
        VhdlType::for_width(mem.width, mem.signed),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_common::Interner;
    use tessel_config::NamingConfig;
    use tessel_netlist::{Design, DesignBuilder, PortDirection, ScopeId, ScopeKind};

    fn lower_one(build: impl FnOnce(&mut DesignBuilder<'_>, ScopeId) -> LpmId) -> Result<String, LowerError> {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let id = build(&mut b, top);
        let design: Design = b.finish();
        let naming = NamingConfig::default();
        let mut ctx = UnitContext::new(&design, &interner, &naming, top);
        lpm_to_expr(&mut ctx, id).map(|e| e.to_string())
    }

    #[test]
    fn repeat_concatenates_copies() {
        let text = lower_one(|b, top| {
            let a = b.port(top, "a", 2, PortDirection::Input);
            let data = b.signal_nexus(a);
            let q = b.nexus();
            b.lpm(top, "rep", LpmKind::Repeat { width: 6, count: 3, q, data })
        });
        assert_eq!(text.unwrap(), "a & a & a");
    }

    #[test]
    fn repeat_of_zero_is_unsupported() {
        let err = lower_one(|b, top| {
            let a = b.port(top, "a", 2, PortDirection::Input);
            let data = b.signal_nexus(a);
            let q = b.nexus();
            b.lpm(top, "rep", LpmKind::Repeat { width: 0, count: 0, q, data })
        });
        assert!(matches!(err, Err(LowerError::Unsupported { .. })));
    }

    #[test]
    fn sign_extension_resizes_signed_operand() {
        let text = lower_one(|b, top| {
            let a = b.port(top, "a", 4, PortDirection::Input);
            b.signal_mut(a).signed = true;
            let data = b.signal_nexus(a);
            let q = b.nexus();
            b.lpm(top, "ext", LpmKind::SignExt { width: 8, signed: true, q, data })
        });
        assert_eq!(text.unwrap(), "Resize(a, 8)");
    }

    #[test]
    fn user_function_named_after_calling_device() {
        let text = lower_one(|b, top| {
            let def = b.scope(top, "parity", "parity", ScopeKind::Function);
            let a = b.port(top, "a", 8, PortDirection::Input);
            let c = b.port(top, "b", 8, PortDirection::Input);
            let args = vec![b.signal_nexus(a), b.signal_nexus(c)];
            let q = b.nexus();
            b.lpm(top, "call0", LpmKind::UserFunc { def, width: 1, signed: false, q, args })
        });
        assert_eq!(text.unwrap(), "call0(a, b)");
    }

    #[test]
    fn signed_user_function_converts_like_signed() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let def = b.scope(top, "neg", "neg", ScopeKind::Function);
        let a = b.port(top, "a", 4, PortDirection::Input);
        let args = vec![b.signal_nexus(a)];
        let q = b.nexus();
        let id = b.lpm(top, "negate", LpmKind::UserFunc { def, width: 4, signed: true, q, args });
        let design: Design = b.finish();
        let naming = NamingConfig::default();
        let mut ctx = UnitContext::new(&design, &interner, &naming, top);
        let call = lpm_to_expr(&mut ctx, id).unwrap();
        assert_eq!(call.ty, VhdlType::Signed(4));
        assert_eq!(call.cast(&VhdlType::Signed(8)).unwrap().to_string(), "Resize(negate(a), 8)");
    }

    #[test]
    fn concat_reinterprets_signed_inputs() {
        let text = lower_one(|b, top| {
            let lo = b.port(top, "lo", 4, PortDirection::Input);
            let hi = b.port(top, "hi", 4, PortDirection::Input);
            b.signal_mut(lo).signed = true;
            b.signal_mut(hi).signed = true;
            let inputs = vec![b.signal_nexus(lo), b.signal_nexus(hi)];
            let q = b.nexus();
            b.lpm(top, "cat", LpmKind::Concat { width: 8, q, inputs })
        });
        assert_eq!(text.unwrap(), "Unsigned(hi) & Unsigned(lo)");
    }

    #[test]
    fn repeat_reinterprets_signed_input() {
        let text = lower_one(|b, top| {
            let a = b.port(top, "a", 2, PortDirection::Input);
            b.signal_mut(a).signed = true;
            let data = b.signal_nexus(a);
            let q = b.nexus();
            b.lpm(top, "rep", LpmKind::Repeat { width: 4, count: 2, q, data })
        });
        assert_eq!(text.unwrap(), "Unsigned(a) & Unsigned(a)");
    }

    #[test]
    fn single_input_mux_is_its_input() {
        let text = lower_one(|b, top| {
            let a = b.port(top, "a", 8, PortDirection::Input);
            let s = b.port(top, "s", 1, PortDirection::Input);
            let (data, select) = (vec![b.signal_nexus(a)], b.signal_nexus(s));
            let q = b.nexus();
            b.lpm(top, "m", LpmKind::Mux { width: 8, select_width: 1, q, data, select })
        });
        assert_eq!(text.unwrap(), "a");
    }

    #[test]
    fn one_bit_select_compares_with_character() {
        let text = lower_one(|b, top| {
            let a = b.port(top, "a", 8, PortDirection::Input);
            let c = b.port(top, "c", 8, PortDirection::Input);
            let s = b.port(top, "s", 1, PortDirection::Input);
            let data = vec![b.signal_nexus(a), b.signal_nexus(c)];
            let select = b.signal_nexus(s);
            let q = b.nexus();
            b.lpm(top, "m", LpmKind::Mux { width: 8, select_width: 1, q, data, select })
        });
        assert_eq!(text.unwrap(), "a when s = '0' else c");
    }

    #[test]
    fn constant_operand_is_a_literal() {
        let text = lower_one(|b, top| {
            let a = b.port(top, "a", 4, PortDirection::Input);
            let na = b.signal_nexus(a);
            let k = b.constant_bits("0011", false).unwrap();
            let nk = b.const_nexus(k);
            let q = b.nexus();
            b.lpm(
                top,
                "sub0",
                LpmKind::Arith { op: ArithOp::Sub, width: 4, signed: false, q, a: na, b: nk },
            )
        });
        assert_eq!(text.unwrap(), "a - \"0011\"");
    }
}
