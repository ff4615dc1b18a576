//! Read-only query interface over a netlist.
//!
//! Code generators are written against [`NetlistView`] rather than against
//! [`Design`] directly, so that they only ever see the design through
//! per-entity, per-nexus and per-scope queries.

use crate::constant::Constant;
use crate::design::Design;
use crate::event::Event;
use crate::expr::Expr;
use crate::ids::{
    ConstId, EventId, ExprId, LogicId, LpmId, MemoryId, NexusId, ParamId, ProcessId, ScopeId,
    SignalId, StmtId,
};
use crate::logic::LogicGate;
use crate::lpm::Lpm;
use crate::memory::Memory;
use crate::nexus::{Nexus, NexusPin, PinOwner};
use crate::param::Parameter;
use crate::process::Process;
use crate::scope::{Scope, ScopeWalk};
use crate::signal::Signal;
use crate::stmt::Stmt;

/// Queries a code generator may make of a netlist.
///
/// Entity getters take handles that the view itself produced; passing a
/// handle from another design is a caller bug and may panic.
pub trait NetlistView: Sync {
    /// Returns the root scopes in declaration order.
    fn roots(&self) -> &[ScopeId];
    /// Returns the simulation time precision exponent.
    fn time_precision(&self) -> i8;

    fn scope(&self, id: ScopeId) -> &Scope;
    fn signal(&self, id: SignalId) -> &Signal;
    fn nexus(&self, id: NexusId) -> &Nexus;
    fn lpm(&self, id: LpmId) -> &Lpm;
    fn logic(&self, id: LogicId) -> &LogicGate;
    fn constant(&self, id: ConstId) -> &Constant;
    fn memory(&self, id: MemoryId) -> &Memory;
    fn event(&self, id: EventId) -> &Event;
    fn param(&self, id: ParamId) -> &Parameter;
    fn expr(&self, id: ExprId) -> &Expr;
    fn stmt(&self, id: StmtId) -> &Stmt;

    /// Returns the number of processes.
    fn process_count(&self) -> usize;
    fn process(&self, id: ProcessId) -> &Process;

    /// Walks every scope in deterministic pre-order.
    fn walk(&self) -> ScopeWalk<'_, Self> {
        ScopeWalk::new(self)
    }

    /// Returns the `index`th pin of a nexus.
    fn nexus_pin(&self, nexus: NexusId, index: usize) -> Option<&NexusPin> {
        self.nexus(nexus).pin(index)
    }

    /// Returns the nexus connected to `pin` of `lpm`.
    fn lpm_pin(&self, lpm: LpmId, pin: u32) -> Option<NexusId> {
        self.lpm(lpm).pin(pin)
    }

    /// Returns the nexus connected to `pin` of a gate.
    fn logic_pin(&self, logic: LogicId, pin: u32) -> Option<NexusId> {
        self.logic(logic).pins.get(pin as usize).copied()
    }

    /// Returns the nexus carried by `pin` of any pin owner.
    fn owner_pin(&self, owner: PinOwner, pin: u32) -> Option<NexusId> {
        match owner {
            PinOwner::Signal(id) => (pin == 0).then(|| self.signal(id).nexus),
            PinOwner::Const(id) => (pin == 0).then(|| self.constant(id).nexus),
            PinOwner::Lpm(id) => self.lpm_pin(id, pin),
            PinOwner::Logic(id) => self.logic_pin(id, pin),
        }
    }

    /// Returns the processes declared in `scope`.
    fn processes_in(&self, scope: ScopeId) -> Vec<ProcessId> {
        (0..self.process_count() as u32)
            .map(ProcessId::from_raw)
            .filter(|&id| self.process(id).scope == scope)
            .collect()
    }
}

impl NetlistView for Design {
    fn roots(&self) -> &[ScopeId] {
        &self.roots
    }

    fn time_precision(&self) -> i8 {
        self.time_precision
    }

    fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    fn signal(&self, id: SignalId) -> &Signal {
        &self.signals[id]
    }

    fn nexus(&self, id: NexusId) -> &Nexus {
        &self.nexuses[id]
    }

    fn lpm(&self, id: LpmId) -> &Lpm {
        &self.lpms[id]
    }

    fn logic(&self, id: LogicId) -> &LogicGate {
        &self.logic[id]
    }

    fn constant(&self, id: ConstId) -> &Constant {
        &self.consts[id]
    }

    fn memory(&self, id: MemoryId) -> &Memory {
        &self.memories[id]
    }

    fn event(&self, id: EventId) -> &Event {
        &self.events[id]
    }

    fn param(&self, id: ParamId) -> &Parameter {
        &self.params[id]
    }

    fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    fn process_count(&self) -> usize {
        self.processes.len()
    }

    fn process(&self, id: ProcessId) -> &Process {
        &self.processes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DesignBuilder;
    use crate::lpm::{ArithOp, LpmKind};
    use crate::process::ProcessKind;
    use crate::scope::ScopeKind;
    use tessel_common::Interner;

    #[test]
    fn lpm_pins_resolve_through_view() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let a = b.signal(top, "a", 8);
        let bb = b.signal(top, "b", 8);
        let q = b.nexus();
        let na = b.signal_nexus(a);
        let nb = b.signal_nexus(bb);
        let add = b.lpm(
            top,
            "add0",
            LpmKind::Arith {
                op: ArithOp::Add,
                width: 8,
                signed: false,
                q,
                a: na,
                b: nb,
            },
        );
        let design = b.finish();

        assert_eq!(design.lpm_pin(add, 0), Some(q));
        assert_eq!(design.lpm_pin(add, 2), Some(nb));
        assert_eq!(design.owner_pin(PinOwner::Signal(a), 0), Some(na));
        assert_eq!(design.owner_pin(PinOwner::Signal(a), 1), None);
        let pin = design.nexus_pin(na, 1).unwrap();
        assert_eq!(pin.owner, PinOwner::Lpm(add));
        assert_eq!(pin.pin, 1);
    }

    #[test]
    fn processes_filtered_by_scope() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let sub = b.scope(top, "u", "u", ScopeKind::Module);
        let noop = b.stmt(Stmt::Noop);
        let p = b.process(ProcessKind::Initial, sub, noop);
        let design = b.finish();

        assert!(design.processes_in(top).is_empty());
        assert_eq!(design.processes_in(sub), vec![p]);
    }
}
