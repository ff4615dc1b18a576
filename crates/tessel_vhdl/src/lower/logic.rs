//! Lowering of primitive gates.

use crate::ast::{BinOp, Expr, ExprKind, UnOp, VhdlType};
use crate::context::UnitContext;
use crate::error::LowerError;
use crate::nexus::nexus_to_ref;
use tessel_netlist::{LogicId, LogicType, NetlistView};

/// Lowers the gate `id` to the expression for its output value.
///
/// N-input gates fold their inputs with the VHDL operator; the inverting
/// forms wrap the fold in `not`. Tristate drivers, switches, pulls and
/// UDPs have no concurrent equivalent.
pub fn logic_to_expr<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    id: LogicId,
) -> Result<Expr, LowerError> {
    let gate = ctx.view().logic(id);
    let (op, invert) = match gate.ty {
        LogicType::And => (BinOp::And, false),
        LogicType::Nand => (BinOp::And, true),
        LogicType::Or => (BinOp::Or, false),
        LogicType::Nor => (BinOp::Or, true),
        LogicType::Xor => (BinOp::Xor, false),
        LogicType::Xnor => (BinOp::Xor, true),
        LogicType::Not => {
            let operand = single_input(ctx, id)?;
            let ty = operand.ty.clone();
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnOp::Not,
                    operand: Box::new(operand),
                },
                ty,
            ));
        }
        LogicType::Buf | LogicType::Bufz => return single_input(ctx, id),
        other => return Err(LowerError::unsupported("logic gate", other)),
    };
    let ty = VhdlType::for_width(gate.width, false);
    let mut operands = Vec::with_capacity(gate.inputs().len());
    for &input in gate.inputs() {
        operands.push(nexus_to_ref(ctx, input)?.cast(&ty)?);
    }
    let fold = match operands.len() {
        0 => return Err(LowerError::unsupported("logic gate", "without inputs")),
        1 => operands.remove(0),
        _ => Expr::binary(op, operands, ty),
    };
    Ok(if invert { fold.not() } else { fold })
}

fn single_input<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    id: LogicId,
) -> Result<Expr, LowerError> {
    let gate = ctx.view().logic(id);
    match gate.inputs() {
        [input] => nexus_to_ref(ctx, *input)?.cast(&VhdlType::for_width(gate.width, false)),
        _ => Err(LowerError::unsupported(
            "logic gate",
            format!("{} with {} inputs", gate.ty, gate.inputs().len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_common::Interner;
    use tessel_config::NamingConfig;
    use tessel_netlist::{DesignBuilder, PortDirection, ScopeKind};

    fn lower_gate(ty: LogicType, width: u32, inputs: usize) -> Result<String, LowerError> {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let mut pins = vec![b.nexus()];
        for i in 0..inputs {
            let s = b.port(top, &format!("i{i}"), width, PortDirection::Input);
            pins.push(b.signal_nexus(s));
        }
        let id = b.logic(top, "g", ty, width, pins);
        let design = b.finish();
        let naming = NamingConfig::default();
        let mut ctx = UnitContext::new(&design, &interner, &naming, top);
        logic_to_expr(&mut ctx, id).map(|e| e.to_string())
    }

    #[test]
    fn xnor_is_negated_xor() {
        assert_eq!(lower_gate(LogicType::Xnor, 1, 2).unwrap(), "not (i0 xor i1)");
    }

    #[test]
    fn vector_gates_keep_width() {
        assert_eq!(lower_gate(LogicType::Or, 4, 2).unwrap(), "i0 or i1");
    }

    #[test]
    fn buffers_pass_through() {
        assert_eq!(lower_gate(LogicType::Bufz, 1, 1).unwrap(), "i0");
        assert_eq!(lower_gate(LogicType::Not, 1, 1).unwrap(), "not i0");
    }

    #[test]
    fn buffer_with_two_inputs_is_rejected() {
        let err = lower_gate(LogicType::Buf, 1, 2).unwrap_err();
        assert_eq!(err.to_string(), "unsupported logic gate `buf with 2 inputs`");
    }

    #[test]
    fn switches_are_unsupported() {
        assert!(matches!(
            lower_gate(LogicType::Nmos, 1, 2),
            Err(LowerError::Unsupported { what: "logic gate", .. })
        ));
    }
}
