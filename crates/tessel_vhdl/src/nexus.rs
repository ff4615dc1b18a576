//! Operand resolution: from a nexus to the VHDL expression that carries
//! its value inside the unit being generated.

use crate::ast::{Expr, ExprKind, VhdlType};
use crate::context::UnitContext;
use crate::error::LowerError;
use tessel_netlist::{ConstValue, Constant, NetlistView, NexusId, PinOwner};

/// Resolves `nexus` to an operand expression.
///
/// Candidates are tried in this order:
///
/// 1. the first non-local signal attached to the nexus that is declared in
///    the unit's scope;
/// 2. a constant driving the nexus, as a literal;
/// 3. an LPM device of this scope whose output drives the nexus, as a
///    reference to its intermediate output (declared on first use);
/// 4. a logic gate of this scope driving the nexus, likewise.
///
/// Anything else is an unresolved reference.
pub fn nexus_to_ref<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    nexus: NexusId,
) -> Result<Expr, LowerError> {
    let view = ctx.view();
    let pins = &view.nexus(nexus).pins;

    if let Some(id) = signal_in_scope(ctx, nexus) {
        return Ok(ctx.signal_ref(id));
    }

    for pin in pins {
        if let PinOwner::Const(id) = pin.owner {
            return Ok(constant_literal(view.constant(id)));
        }
    }

    for pin in pins {
        match pin.owner {
            PinOwner::Lpm(id) if pin.pin == 0 => {
                let lpm = view.lpm(id);
                if lpm.scope == ctx.scope() {
                    let name = ctx.lpm_output_name(lpm.name);
                    return Ok(ctx.intermediate(name, VhdlType::for_width(lpm.width(), lpm.signed())));
                }
            }
            _ => {}
        }
    }

    for pin in pins {
        match pin.owner {
            PinOwner::Logic(id) if pin.pin == 0 => {
                let gate = view.logic(id);
                if gate.scope == ctx.scope() {
                    let name = ctx.logic_output_name(gate.name);
                    return Ok(ctx.intermediate(name, VhdlType::for_width(gate.width, false)));
                }
            }
            _ => {}
        }
    }

    let what = match view.nexus(nexus).name {
        Some(name) => format!("net `{}`", ctx.name(name)),
        None => nexus.to_string(),
    };
    log::trace!("{}: {what} has no visible source", ctx.path());
    Err(LowerError::Unresolved(format!(
        "{what} has no signal, constant or driver in scope `{}`",
        ctx.path()
    )))
}

/// Returns the first non-local signal of the unit's scope on `nexus`.
pub fn signal_in_scope<N: NetlistView>(
    ctx: &UnitContext<'_, N>,
    nexus: NexusId,
) -> Option<tessel_netlist::SignalId> {
    let view = ctx.view();
    view.nexus(nexus).signals().find(|&id| {
        let signal = view.signal(id);
        signal.scope == ctx.scope() && !signal.local
    })
}

/// Returns the literal for a constant.
pub fn constant_literal(constant: &Constant) -> Expr {
    match &constant.value {
        ConstValue::Bits(bits) => Expr::bits(bits, constant.signed),
        ConstValue::Real(value) => Expr::new(ExprKind::Real(*value), VhdlType::Real),
    }
}
