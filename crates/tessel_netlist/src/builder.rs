//! Construction API for designs.
//!
//! [`DesignBuilder`] is how a front end (or a test) populates a [`Design`].
//! It keeps the fabric consistent: every signal gets its own nexus, and
//! adding a device attaches each of its ports to the nexus it names, in
//! pin order.

use crate::constant::{parse_bits, ConstValue, Constant};
use crate::design::Design;
use crate::event::Event;
use crate::expr::Expr;
use crate::ids::{
    ConstId, EventId, ExprId, LogicId, LpmId, MemoryId, NexusId, ParamId, ProcessId, ScopeId,
    SignalId, StmtId,
};
use crate::logic::{LogicGate, LogicType};
use crate::lpm::{Lpm, LpmKind};
use crate::memory::Memory;
use crate::nexus::{DriveStrength, Nexus, NexusPin, PinOwner};
use crate::param::Parameter;
use crate::process::{Process, ProcessKind};
use crate::scope::{Scope, ScopeKind};
use crate::signal::{DataType, PortDirection, Signal, SignalType};
use crate::stmt::Stmt;
use tessel_common::Interner;

/// Incrementally builds a [`Design`].
pub struct DesignBuilder<'a> {
    design: Design,
    interner: &'a Interner,
}

impl<'a> DesignBuilder<'a> {
    /// Creates a builder that interns names into `interner`.
    pub fn new(interner: &'a Interner) -> Self {
        Self {
            design: Design::new(),
            interner,
        }
    }

    /// Sets the design's time precision exponent.
    pub fn set_time_precision(&mut self, exponent: i8) {
        self.design.time_precision = exponent;
    }

    /// Adds a root scope.
    pub fn root_scope(&mut self, name: &str, type_name: &str, kind: ScopeKind) -> ScopeId {
        let scope = Scope::new(
            self.interner.get_or_intern(name),
            self.interner.get_or_intern(type_name),
            kind,
            None,
        );
        let id = self.design.scopes.alloc(scope);
        self.design.roots.push(id);
        id
    }

    /// Adds a child scope under `parent`.
    pub fn scope(&mut self, parent: ScopeId, name: &str, type_name: &str, kind: ScopeKind) -> ScopeId {
        let scope = Scope::new(
            self.interner.get_or_intern(name),
            self.interner.get_or_intern(type_name),
            kind,
            Some(parent),
        );
        let id = self.design.scopes.alloc(scope);
        self.design.scopes[parent].children.push(id);
        id
    }

    /// Returns a scope for in-place adjustment (time units, definition body).
    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.design.scopes[id]
    }

    /// Adds an unsigned wire of `width` bits to `scope` on a fresh nexus.
    pub fn signal(&mut self, scope: ScopeId, name: &str, width: u32) -> SignalId {
        let nexus = self.nexus();
        let signal = Signal {
            name: self.interner.get_or_intern(name),
            scope,
            ty: SignalType::Wire,
            port: PortDirection::None,
            data_type: DataType::Logic,
            width,
            signed: false,
            is_int: false,
            local: false,
            lsb_index: 0,
            lsb_dist: 1,
            nexus,
        };
        let id = self.design.signals.alloc(signal);
        self.design.scopes[scope].signals.push(id);
        self.attach(nexus, PinOwner::Signal(id), 0, DriveStrength::HiZ);
        id
    }

    /// Adds a port signal and appends it to the scope's port list.
    pub fn port(&mut self, scope: ScopeId, name: &str, width: u32, dir: PortDirection) -> SignalId {
        let id = self.signal(scope, name, width);
        self.design.signals[id].port = dir;
        self.design.scopes[scope].ports.push(id);
        id
    }

    /// Returns a signal for in-place adjustment (type, signedness, flags).
    pub fn signal_mut(&mut self, id: SignalId) -> &mut Signal {
        &mut self.design.signals[id]
    }

    /// Returns the nexus a signal is attached to.
    pub fn signal_nexus(&self, id: SignalId) -> NexusId {
        self.design.signals[id].nexus
    }

    /// Allocates an unnamed nexus with no pins yet.
    pub fn nexus(&mut self) -> NexusId {
        self.design.nexuses.alloc(Nexus::default())
    }

    /// Names a nexus.
    pub fn name_nexus(&mut self, nexus: NexusId, name: &str) {
        self.design.nexuses[nexus].name = Some(self.interner.get_or_intern(name));
    }

    /// Adds a constant to the pool, driving a fresh nexus.
    pub fn constant(&mut self, value: ConstValue, width: u32, signed: bool) -> ConstId {
        let nexus = self.nexus();
        let id = self.design.consts.alloc(Constant {
            width,
            signed,
            value,
            nexus,
        });
        self.attach(nexus, PinOwner::Const(id), 0, DriveStrength::Strong);
        id
    }

    /// Adds a constant written as a bit string, most significant bit first.
    ///
    /// Returns `None` if the string contains a character other than
    /// `0`, `1`, `x` or `z`.
    pub fn constant_bits(&mut self, msb_first: &str, signed: bool) -> Option<ConstId> {
        let bits = parse_bits(msb_first)?;
        let width = bits.len() as u32;
        Some(self.constant(ConstValue::Bits(bits), width, signed))
    }

    /// Returns the nexus a constant drives.
    pub fn const_nexus(&self, id: ConstId) -> NexusId {
        self.design.consts[id].nexus
    }

    /// Adds a memory of `size` words of `width` bits, indexed from 0.
    pub fn memory(&mut self, scope: ScopeId, name: &str, width: u32, size: u32) -> MemoryId {
        let id = self.design.memories.alloc(Memory {
            name: self.interner.get_or_intern(name),
            scope,
            width,
            signed: false,
            size,
            root: 0,
        });
        self.design.scopes[scope].memories.push(id);
        id
    }

    /// Returns a memory for in-place adjustment.
    pub fn memory_mut(&mut self, id: MemoryId) -> &mut Memory {
        &mut self.design.memories[id]
    }

    /// Adds an LPM device and attaches its ports.
    ///
    /// The output `q` drives its nexus with strong drive; every other port
    /// attaches as a high-impedance input.
    pub fn lpm(&mut self, scope: ScopeId, name: &str, kind: LpmKind) -> LpmId {
        let lpm = Lpm {
            name: self.interner.get_or_intern(name),
            scope,
            kind,
        };
        let pins = lpm.pins();
        let id = self.design.lpms.alloc(lpm);
        self.design.scopes[scope].lpms.push(id);
        for (pin, nexus) in pins.into_iter().enumerate() {
            let drive = if pin == 0 {
                DriveStrength::Strong
            } else {
                DriveStrength::HiZ
            };
            self.attach(nexus, PinOwner::Lpm(id), pin as u32, drive);
        }
        id
    }

    /// Adds a logic gate. `pins[0]` is the output.
    pub fn logic(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: LogicType,
        width: u32,
        pins: Vec<NexusId>,
    ) -> LogicId {
        let gate = LogicGate {
            name: self.interner.get_or_intern(name),
            scope,
            ty,
            width,
            pins: pins.clone(),
            delays: [None; 3],
        };
        let id = self.design.logic.alloc(gate);
        self.design.scopes[scope].logic.push(id);
        for (pin, nexus) in pins.into_iter().enumerate() {
            let drive = match (pin, ty) {
                (0, LogicType::Pullup | LogicType::Pulldown) => DriveStrength::Pull,
                (0, _) => DriveStrength::Strong,
                _ => DriveStrength::HiZ,
            };
            self.attach(nexus, PinOwner::Logic(id), pin as u32, drive);
        }
        id
    }

    /// Sets the rise, fall and turn-off delays of a gate.
    pub fn set_logic_delays(&mut self, id: LogicId, delays: [Option<ExprId>; 3]) {
        self.design.logic[id].delays = delays;
    }

    /// Adds a named event watching `pins` (any, then negedge, then posedge).
    pub fn event(
        &mut self,
        scope: ScopeId,
        name: &str,
        counts: (u32, u32, u32),
        pins: Vec<NexusId>,
    ) -> EventId {
        let (any, neg, pos) = counts;
        let id = self.design.events.alloc(Event {
            name: self.interner.get_or_intern(name),
            scope,
            any,
            neg,
            pos,
            pins,
        });
        self.design.scopes[scope].events.push(id);
        id
    }

    /// Adds a parameter with an elaborated value.
    pub fn param(&mut self, scope: ScopeId, name: &str, value: ExprId) -> ParamId {
        let id = self.design.params.alloc(Parameter {
            name: self.interner.get_or_intern(name),
            scope,
            value,
        });
        self.design.scopes[scope].params.push(id);
        id
    }

    /// Adds an expression node.
    pub fn expr(&mut self, expr: Expr) -> ExprId {
        self.design.exprs.alloc(expr)
    }

    /// Adds a statement node.
    pub fn stmt(&mut self, stmt: Stmt) -> StmtId {
        self.design.stmts.alloc(stmt)
    }

    /// Adds a process.
    pub fn process(&mut self, kind: ProcessKind, scope: ScopeId, stmt: StmtId) -> ProcessId {
        self.design.processes.alloc(Process { kind, scope, stmt })
    }

    /// Returns the design built so far.
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Finishes construction.
    pub fn finish(self) -> Design {
        self.design
    }

    fn attach(&mut self, nexus: NexusId, owner: PinOwner, pin: u32, drive: DriveStrength) {
        self.design.nexuses[nexus].pins.push(NexusPin {
            owner,
            pin,
            drive0: drive,
            drive1: drive,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lpm::{PartSelect, ReduceOp};
    use crate::view::NetlistView;

    #[test]
    fn signal_gets_own_nexus_with_pin_zero() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let a = b.signal(top, "a", 8);
        let c = b.signal(top, "c", 8);
        let design = b.finish();

        let na = design.signal(a).nexus;
        assert_ne!(na, design.signal(c).nexus);
        let pins = &design.nexus(na).pins;
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].owner, PinOwner::Signal(a));
        assert_eq!(pins[0].pin, 0);
    }

    #[test]
    fn port_is_listed() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let clk = b.port(top, "clk", 1, PortDirection::Input);
        let design = b.finish();
        assert_eq!(design.scope(top).ports, vec![clk]);
        assert_eq!(design.signal(clk).port, PortDirection::Input);
    }

    #[test]
    fn lpm_output_drives_strong() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let a = b.signal(top, "a", 8);
        let y = b.signal(top, "y", 1);
        let (na, ny) = (b.signal_nexus(a), b.signal_nexus(y));
        let r = b.lpm(
            top,
            "r0",
            LpmKind::Reduce {
                op: ReduceOp::Or,
                width: 8,
                q: ny,
                data: na,
            },
        );
        let design = b.finish();

        let out = design.nexus(ny).pins[1];
        assert_eq!(out.owner, PinOwner::Lpm(r));
        assert_eq!(out.drive0, DriveStrength::Strong);
        let inp = design.nexus(na).pins[1];
        assert_eq!(inp.pin, 1);
        assert!(!inp.is_driver());
    }

    #[test]
    fn part_select_offset_pin() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let src = b.signal(top, "src", 16);
        let off = b.signal(top, "off", 4);
        let q = b.nexus();
        let (ns, no) = (b.signal_nexus(src), b.signal_nexus(off));
        let id = b.lpm(
            top,
            "sel",
            LpmKind::PartVp(PartSelect {
                width: 4,
                base: 0,
                signed: false,
                q,
                data: ns,
                offset: Some(no),
            }),
        );
        let design = b.finish();
        assert_eq!(design.nexus(no).pins[1].pin, 2);
        assert_eq!(design.nexus(q).pins[0].owner, PinOwner::Lpm(id));
    }

    #[test]
    fn constant_bits() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let c = b.constant_bits("1010", false).unwrap();
        assert!(b.constant_bits("10a", false).is_none());
        let design = b.finish();
        assert_eq!(design.constant(c).width, 4);
        assert_eq!(design.constant(c).as_u64(), Some(10));
    }

    #[test]
    fn gate_pins() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let a = b.signal(top, "a", 1);
        let y = b.signal(top, "y", 1);
        let (na, ny) = (b.signal_nexus(a), b.signal_nexus(y));
        let g = b.logic(top, "g0", LogicType::Not, 1, vec![ny, na]);
        let pu = b.logic(top, "pu", LogicType::Pullup, 1, vec![na]);
        let design = b.finish();
        assert_eq!(design.scope(top).logic, vec![g, pu]);
        assert_eq!(design.nexus(ny).pins[1].drive1, DriveStrength::Strong);
        assert_eq!(design.nexus(na).pins[2].drive1, DriveStrength::Pull);
    }
}
