//! Structural validation of a design.
//!
//! These checks establish the invariants code generation relies on. Any
//! violation is a front-end defect and is fatal: generation does not start
//! on a design that fails validation. Every check reads handles through `try_get`,
//! so malformed input produces an error rather than a panic.

use crate::design::Design;
use crate::expr::ExprKind;
use crate::ids::{EventId, ExprId, LpmId, NexusId, ScopeId};
use crate::lpm::LpmKind;
use crate::nexus::PinOwner;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;

/// A violated structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    #[error("{owner} refers to missing {target}")]
    Dangling { owner: String, target: String },

    #[error("{0} has no attached pins")]
    EmptyNexus(NexusId),

    #[error("{nexus} lists pin {pin} of {owner}, but that port is not connected to it")]
    PinMismatch {
        nexus: NexusId,
        owner: PinOwner,
        pin: u32,
    },

    #[error("pin {pin} of {owner} is connected to {nexus}, which does not list it")]
    UnattachedPort {
        owner: PinOwner,
        pin: u32,
        nexus: NexusId,
    },

    #[error("scope hierarchy contains a cycle through {0}")]
    ScopeCycle(ScopeId),

    #[error("{0} is reachable more than once from the design roots")]
    ScopeShared(ScopeId),

    #[error("{0} is not reachable from the design roots")]
    ScopeUnreachable(ScopeId),

    #[error("{child} is listed under {listed_under:?} but names {parent:?} as its parent")]
    ParentMismatch {
        child: ScopeId,
        listed_under: Option<ScopeId>,
        parent: Option<ScopeId>,
    },

    #[error("{entity} is listed in {scope} but declares {declared} as its scope")]
    ScopeMembership {
        entity: String,
        scope: ScopeId,
        declared: ScopeId,
    },

    #[error("concatenation {expr} is {declared} bits wide but its operands total {actual}")]
    ConcatWidth {
        expr: ExprId,
        declared: u32,
        actual: u64,
    },

    #[error("{0} has zero width")]
    ZeroWidth(LpmId),

    #[error("{event} counts {counted} edges but lists {pins} nexuses")]
    EventPins {
        event: EventId,
        counted: u32,
        pins: usize,
    },
}

/// Checks every invariant and returns the first violation.
pub fn validate(design: &Design) -> Result<(), ValidateError> {
    match validate_all(design).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Checks every invariant and returns all violations found.
///
/// Scope-tree checks stop at the first cycle, since reachability is
/// meaningless on a cyclic tree.
pub fn validate_all(design: &Design) -> Vec<ValidateError> {
    let mut errors = Vec::new();
    check_nexuses(design, &mut errors);
    check_device_ports(design, &mut errors);
    if check_scope_tree(design, &mut errors) {
        check_scope_members(design, &mut errors);
    }
    check_references(design, &mut errors);
    check_exprs(design, &mut errors);
    check_events(design, &mut errors);
    log::debug!(
        "validated {} scopes, {} nexuses, {} devices: {} problems",
        design.scopes.len(),
        design.nexuses.len(),
        design.lpms.len() + design.logic.len(),
        errors.len()
    );
    errors
}

/// Returns the nexus carried by `pin` of `owner`, or `None` if the owner
/// does not exist or has no such pin.
fn owner_pin(design: &Design, owner: PinOwner, pin: u32) -> Option<NexusId> {
    match owner {
        PinOwner::Signal(id) => design
            .signals
            .try_get(id)
            .filter(|_| pin == 0)
            .map(|s| s.nexus),
        PinOwner::Const(id) => design
            .consts
            .try_get(id)
            .filter(|_| pin == 0)
            .map(|c| c.nexus),
        PinOwner::Lpm(id) => design.lpms.try_get(id).and_then(|l| l.pin(pin)),
        PinOwner::Logic(id) => design
            .logic
            .try_get(id)
            .and_then(|g| g.pins.get(pin as usize).copied()),
    }
}

fn check_nexuses(design: &Design, errors: &mut Vec<ValidateError>) {
    for (id, nexus) in design.nexuses.iter() {
        if nexus.pins.is_empty() {
            errors.push(ValidateError::EmptyNexus(id));
            continue;
        }
        for p in &nexus.pins {
            if owner_pin(design, p.owner, p.pin) != Some(id) {
                errors.push(ValidateError::PinMismatch {
                    nexus: id,
                    owner: p.owner,
                    pin: p.pin,
                });
            }
        }
    }
}

fn check_device_ports(design: &Design, errors: &mut Vec<ValidateError>) {
    let mut ports: Vec<(PinOwner, Vec<NexusId>)> = Vec::new();
    for (id, s) in design.signals.iter() {
        ports.push((PinOwner::Signal(id), vec![s.nexus]));
    }
    for (id, c) in design.consts.iter() {
        ports.push((PinOwner::Const(id), vec![c.nexus]));
    }
    for (id, l) in design.lpms.iter() {
        if l.width() == 0 {
            errors.push(ValidateError::ZeroWidth(id));
        }
        ports.push((PinOwner::Lpm(id), l.pins()));
    }
    for (id, g) in design.logic.iter() {
        ports.push((PinOwner::Logic(id), g.pins.clone()));
    }

    for (owner, nexuses) in ports {
        for (pin, nexus) in nexuses.into_iter().enumerate() {
            let pin = pin as u32;
            match design.nexuses.try_get(nexus) {
                None => errors.push(ValidateError::Dangling {
                    owner: owner.to_string(),
                    target: nexus.to_string(),
                }),
                Some(n) if !n.pins.iter().any(|p| p.owner == owner && p.pin == pin) => {
                    errors.push(ValidateError::UnattachedPort { owner, pin, nexus })
                }
                Some(_) => {}
            }
        }
    }
}

/// Checks that the scope lists form a forest covering every scope once.
/// Returns `false` if the tree is too broken to inspect its members.
fn check_scope_tree(design: &Design, errors: &mut Vec<ValidateError>) -> bool {
    let mut graph = DiGraph::<ScopeId, ()>::new();
    let nodes: Vec<NodeIndex> = design.scopes.ids().map(|id| graph.add_node(id)).collect();
    let start = errors.len();

    for &root in &design.roots {
        match design.scopes.try_get(root) {
            None => errors.push(ValidateError::Dangling {
                owner: "design roots".to_string(),
                target: root.to_string(),
            }),
            Some(s) if s.parent.is_some() => errors.push(ValidateError::ParentMismatch {
                child: root,
                listed_under: None,
                parent: s.parent,
            }),
            Some(_) => {}
        }
    }

    for (id, scope) in design.scopes.iter() {
        for &child in &scope.children {
            let Some(c) = design.scopes.try_get(child) else {
                errors.push(ValidateError::Dangling {
                    owner: id.to_string(),
                    target: child.to_string(),
                });
                continue;
            };
            if c.parent != Some(id) {
                errors.push(ValidateError::ParentMismatch {
                    child,
                    listed_under: Some(id),
                    parent: c.parent,
                });
            }
            graph.add_edge(
                nodes[id.as_raw() as usize],
                nodes[child.as_raw() as usize],
                (),
            );
        }
    }
    if errors.len() > start {
        return false;
    }

    if let Err(cycle) = toposort(&graph, None) {
        errors.push(ValidateError::ScopeCycle(graph[cycle.node_id()]));
        return false;
    }

    let mut visits = vec![0u32; design.scopes.len()];
    let mut stack: Vec<ScopeId> = design.roots.clone();
    while let Some(id) = stack.pop() {
        visits[id.as_raw() as usize] += 1;
        stack.extend(design.scopes[id].children.iter().copied());
    }
    let mut ok = true;
    for (index, count) in visits.into_iter().enumerate() {
        let id = ScopeId::from_raw(index as u32);
        match count {
            0 => errors.push(ValidateError::ScopeUnreachable(id)),
            1 => continue,
            _ => errors.push(ValidateError::ScopeShared(id)),
        }
        ok = false;
    }
    ok
}

fn check_scope_members(design: &Design, errors: &mut Vec<ValidateError>) {
    for (id, scope) in design.scopes.iter() {
        let mut member = |entity: String, declared: Option<ScopeId>| match declared {
            None => errors.push(ValidateError::Dangling {
                owner: id.to_string(),
                target: entity,
            }),
            Some(declared) if declared != id => errors.push(ValidateError::ScopeMembership {
                entity,
                scope: id,
                declared,
            }),
            Some(_) => {}
        };
        for &s in scope.signals.iter().chain(&scope.ports) {
            member(s.to_string(), design.signals.try_get(s).map(|x| x.scope));
        }
        for &l in &scope.lpms {
            member(l.to_string(), design.lpms.try_get(l).map(|x| x.scope));
        }
        for &g in &scope.logic {
            member(g.to_string(), design.logic.try_get(g).map(|x| x.scope));
        }
        for &m in &scope.memories {
            member(m.to_string(), design.memories.try_get(m).map(|x| x.scope));
        }
        for &e in &scope.events {
            member(e.to_string(), design.events.try_get(e).map(|x| x.scope));
        }
        for &p in &scope.params {
            member(p.to_string(), design.params.try_get(p).map(|x| x.scope));
        }
    }
}

fn require(errors: &mut Vec<ValidateError>, present: bool, owner: impl ToString, target: impl ToString) {
    if !present {
        errors.push(ValidateError::Dangling {
            owner: owner.to_string(),
            target: target.to_string(),
        });
    }
}

/// Checks the handles devices, parameters and processes hold outside the
/// nexus graph.
fn check_references(design: &Design, errors: &mut Vec<ValidateError>) {
    for (id, lpm) in design.lpms.iter() {
        match &lpm.kind {
            LpmKind::Array { memory, .. } => {
                require(errors, design.memories.contains(*memory), id, memory)
            }
            LpmKind::Ram(ram) => require(errors, design.memories.contains(ram.memory), id, ram.memory),
            LpmKind::UserFunc { def, .. } => require(errors, design.scopes.contains(*def), id, def),
            LpmKind::FlipFlop(ff) => {
                for value in ff.async_set_value.iter().chain(&ff.sync_set_value) {
                    require(errors, design.exprs.contains(*value), id, value);
                }
            }
            _ => {}
        }
    }
    for (id, param) in design.params.iter() {
        require(errors, design.exprs.contains(param.value), id, param.value);
    }
    for (id, process) in design.processes.iter() {
        require(errors, design.scopes.contains(process.scope), id, process.scope);
        require(errors, design.stmts.contains(process.stmt), id, process.stmt);
    }
    for (id, stmt) in design.stmts.iter() {
        for child in stmt.children() {
            require(errors, design.stmts.contains(child), id, child);
        }
    }
}

fn check_exprs(design: &Design, errors: &mut Vec<ValidateError>) {
    for (id, expr) in design.exprs.iter() {
        let target = match &expr.kind {
            ExprKind::Signal(s) => Some((design.signals.contains(*s), s.to_string())),
            ExprKind::Param(p) => Some((design.params.contains(*p), p.to_string())),
            ExprKind::Memory { memory, .. } => {
                Some((design.memories.contains(*memory), memory.to_string()))
            }
            ExprKind::UserFunc { def, .. } | ExprKind::Scope(def) => {
                Some((design.scopes.contains(*def), def.to_string()))
            }
            ExprKind::Event(e) => Some((design.events.contains(*e), e.to_string())),
            _ => None,
        };
        if let Some((present, target)) = target {
            require(errors, present, id, target);
        }
        for operand in expr.operands() {
            if !design.exprs.contains(operand) {
                errors.push(ValidateError::Dangling {
                    owner: id.to_string(),
                    target: operand.to_string(),
                });
            }
        }
        if let ExprKind::Concat { repeat, parts } = &expr.kind {
            let Some(sum) = parts
                .iter()
                .map(|&p| design.exprs.try_get(p).map(|e| u64::from(e.width)))
                .sum::<Option<u64>>()
            else {
                continue;
            };
            let actual = u64::from(*repeat) * sum;
            if actual != u64::from(expr.width) {
                errors.push(ValidateError::ConcatWidth {
                    expr: id,
                    declared: expr.width,
                    actual,
                });
            }
        }
    }
}

fn check_events(design: &Design, errors: &mut Vec<ValidateError>) {
    for (id, event) in design.events.iter() {
        if !event.is_consistent() {
            errors.push(ValidateError::EventPins {
                event: id,
                counted: event.any + event.neg + event.pos,
                pins: event.pins.len(),
            });
        }
    }
}
