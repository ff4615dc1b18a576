//! Lowering of netlist devices to concurrent signal assignments.
//!
//! [`draw_lpm`] and [`draw_logic`] produce exactly one [`Assign`] per
//! device, or the [`LowerError`] that classifies why the device cannot be
//! expressed. Failures are local: the caller reports them and moves on to
//! the next device.

pub mod expr;
pub mod logic;
pub mod lpm;

use crate::ast::{Assign, Expr, VhdlType};
use crate::context::UnitContext;
use crate::error::LowerError;
use crate::nexus::signal_in_scope;
use tessel_netlist::{LogicId, LpmId, LpmKind, NetlistView};

pub use self::expr::lower_expr;
pub use self::logic::logic_to_expr;
pub use self::lpm::lpm_to_expr;

/// Lowers an LPM device to the assignment of its output.
///
/// The value is lowered before the target so that intermediates read by
/// the device are declared ahead of its own.
pub fn draw_lpm<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    id: LpmId,
) -> Result<Assign, LowerError> {
    let value = lpm_to_expr(ctx, id)?;
    let target = lpm_output(ctx, id)?;
    let value = value.cast(&target.ty)?;
    Ok(Assign { target, value })
}

/// Returns the expression an LPM device's output is written to.
///
/// A signal of this scope on the output nexus is used when there is one;
/// otherwise the device gets an `LPM<name>_Out` intermediate. A PV part
/// select writes only its slice of the destination signal.
pub fn lpm_output<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    id: LpmId,
) -> Result<Expr, LowerError> {
    let lpm = ctx.view().lpm(id);
    let Some(signal) = signal_in_scope(ctx, lpm.q()) else {
        let name = ctx.lpm_output_name(lpm.name);
        let ty = VhdlType::for_width(lpm.width(), lpm.signed());
        return Ok(ctx.intermediate(name, ty));
    };
    let dest = ctx.signal_ref(signal);
    let LpmKind::PartPv(part) = &lpm.kind else {
        return Ok(dest);
    };
    let dest_width = dest.ty.width().unwrap_or(0);
    if part.offset.is_none() && part.width == dest_width && part.base == 0 {
        return Ok(dest);
    }
    if part.offset.is_none() {
        let high = u64::from(part.base) + u64::from(part.width) - 1;
        if high >= u64::from(dest_width) {
            return Err(LowerError::SliceOutOfRange {
                low: u64::from(part.base),
                high,
                width: dest_width,
            });
        }
    }
    let low = lpm::part_select_base(ctx, part)?;
    let ty = dest.ty.clone();
    dest.part(low, part.width)
        .ok_or_else(|| LowerError::unsupported("part select of", ty))
}

/// Lowers a logic gate to the assignment of its output.
pub fn draw_logic<N: NetlistView>(
    ctx: &mut UnitContext<'_, N>,
    id: LogicId,
) -> Result<Assign, LowerError> {
    let value = logic_to_expr(ctx, id)?;
    let gate = ctx.view().logic(id);
    let Some(output) = gate.output() else {
        return Err(LowerError::unsupported("logic gate", "without pins"));
    };
    let target = match signal_in_scope(ctx, output) {
        Some(signal) => ctx.signal_ref(signal),
        None => {
            let name = ctx.logic_output_name(gate.name);
            ctx.intermediate(name, VhdlType::for_width(gate.width, false))
        }
    };
    let value = value.cast(&target.ty)?;
    Ok(Assign { target, value })
}
