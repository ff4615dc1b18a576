//! The scope tree.
//!
//! Scopes form a forest rooted at [`Design::roots`](crate::Design::roots).
//! Each scope owns the entities declared in it; traversal order of this tree
//! is the order in which generated units appear in the output.

use crate::ids::{EventId, LogicId, LpmId, MemoryId, ParamId, ScopeId, SignalId, StmtId};
use crate::view::NetlistView;
use serde::{Deserialize, Serialize};
use tessel_common::Ident;

/// What construct a scope was elaborated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    /// A module instance.
    Module,
    /// A task definition.
    Task,
    /// A function definition.
    Function,
    /// A named `begin`/`end` block.
    Begin,
    /// A named `fork`/`join` block.
    Fork,
    /// A generate block.
    Generate,
}

impl ScopeKind {
    /// Returns `true` for task and function scopes.
    pub fn is_definition(self) -> bool {
        matches!(self, ScopeKind::Task | ScopeKind::Function)
    }
}

/// A node of the scope tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    /// Instance basename.
    pub name: Ident,
    /// Definition name: the module, task or function name.
    pub type_name: Ident,
    /// Construct kind.
    pub kind: ScopeKind,
    /// Time unit exponent (`-9` for ns).
    pub time_units: i8,
    /// Parent scope; `None` for roots.
    pub parent: Option<ScopeId>,
    /// Child scopes in declaration order.
    pub children: Vec<ScopeId>,
    /// Declared signals, ports included.
    pub signals: Vec<SignalId>,
    /// Declared logic gates.
    pub logic: Vec<LogicId>,
    /// Declared LPM devices.
    pub lpms: Vec<LpmId>,
    /// Declared memories.
    pub memories: Vec<MemoryId>,
    /// Declared named events.
    pub events: Vec<EventId>,
    /// Declared parameters.
    pub params: Vec<ParamId>,
    /// Port signals in port-list order.
    pub ports: Vec<SignalId>,
    /// Body of a task or function definition.
    pub def: Option<StmtId>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new(name: Ident, type_name: Ident, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            type_name,
            kind,
            time_units: 0,
            parent,
            children: Vec::new(),
            signals: Vec::new(),
            logic: Vec::new(),
            lpms: Vec::new(),
            memories: Vec::new(),
            events: Vec::new(),
            params: Vec::new(),
            ports: Vec::new(),
            def: None,
        }
    }
}

/// A name found in a scope's immediate namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeItem {
    Signal(SignalId),
    Memory(MemoryId),
    Event(EventId),
    Param(ParamId),
    Scope(ScopeId),
}

/// Depth-first pre-order iterator over the scope tree.
///
/// Yields a scope, then its children in declaration order, then its next
/// sibling. Roots are visited in the order the design lists them.
pub struct ScopeWalk<'a, N: NetlistView + ?Sized> {
    view: &'a N,
    stack: Vec<ScopeId>,
}

impl<'a, N: NetlistView + ?Sized> ScopeWalk<'a, N> {
    /// Starts a walk over all roots of `view`.
    pub fn new(view: &'a N) -> Self {
        let stack = view.roots().iter().rev().copied().collect();
        Self { view, stack }
    }

    /// Starts a walk over the subtree rooted at `scope`.
    pub fn from_scope(view: &'a N, scope: ScopeId) -> Self {
        Self {
            view,
            stack: vec![scope],
        }
    }
}

impl<N: NetlistView + ?Sized> Iterator for ScopeWalk<'_, N> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.view.scope(id).children.iter().rev().copied());
        Some(id)
    }
}

/// Looks up `name` in the immediate namespace of `scope`.
///
/// Signals shadow memories, which shadow events, parameters and child
/// scopes, in that order.
pub fn lookup<N: NetlistView + ?Sized>(view: &N, scope: ScopeId, name: Ident) -> Option<ScopeItem> {
    let s = view.scope(scope);
    if let Some(&id) = s.signals.iter().find(|&&id| view.signal(id).name == name) {
        return Some(ScopeItem::Signal(id));
    }
    if let Some(&id) = s.memories.iter().find(|&&id| view.memory(id).name == name) {
        return Some(ScopeItem::Memory(id));
    }
    if let Some(&id) = s.events.iter().find(|&&id| view.event(id).name == name) {
        return Some(ScopeItem::Event(id));
    }
    if let Some(&id) = s.params.iter().find(|&&id| view.param(id).name == name) {
        return Some(ScopeItem::Param(id));
    }
    s.children
        .iter()
        .find(|&&id| view.scope(id).name == name)
        .map(|&id| ScopeItem::Scope(id))
}

/// Resolves `name` starting at `scope` and walking up the parent chain.
///
/// Returns the scope in which the name was found along with the item.
pub fn resolve<N: NetlistView + ?Sized>(
    view: &N,
    scope: ScopeId,
    name: Ident,
) -> Option<(ScopeId, ScopeItem)> {
    let mut current = Some(scope);
    while let Some(id) = current {
        if let Some(item) = lookup(view, id, name) {
            return Some((id, item));
        }
        current = view.scope(id).parent;
    }
    None
}

/// Returns the scope's basenames from its root down to itself.
pub fn path<N: NetlistView + ?Sized>(view: &N, scope: ScopeId) -> Vec<Ident> {
    let mut names = Vec::new();
    let mut current = Some(scope);
    while let Some(id) = current {
        let s = view.scope(id);
        names.push(s.name);
        current = s.parent;
    }
    names.reverse();
    names
}

/// Returns the sibling that follows `scope` in its parent's child list, or
/// among the roots for a root scope.
pub fn next_sibling<N: NetlistView + ?Sized>(view: &N, scope: ScopeId) -> Option<ScopeId> {
    let siblings = match view.scope(scope).parent {
        Some(parent) => view.scope(parent).children.as_slice(),
        None => view.roots(),
    };
    let pos = siblings.iter().position(|&id| id == scope)?;
    siblings.get(pos + 1).copied()
}
