//! Per-unit generation state.
//!
//! A [`UnitContext`] is created for each module scope being generated and
//! passed explicitly through lowering. It owns the unit's declarations and
//! the set of names already declared, so units can be generated
//! independently of each other.

use crate::ast::{Decl, Expr, VhdlType};
use crate::codes;
use crate::names::legalize;
use std::collections::{HashMap, HashSet};
use tessel_common::{Ident, Interner};
use tessel_config::NamingConfig;
use tessel_diagnostics::{Diagnostic, Location};
use tessel_netlist::{scope, DataType, MemoryId, NetlistView, ScopeId, Signal, SignalId};

/// Generation state of one VHDL unit.
pub struct UnitContext<'a, N: NetlistView> {
    view: &'a N,
    interner: &'a Interner,
    naming: &'a NamingConfig,
    scope: ScopeId,
    path: String,
    /// Lowercased, since VHDL identifiers are case-insensitive.
    declared: HashSet<String>,
    decls: Vec<Decl>,
    memories: HashMap<MemoryId, String>,
    renamed: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, N: NetlistView> UnitContext<'a, N> {
    pub fn new(view: &'a N, interner: &'a Interner, naming: &'a NamingConfig, scope: ScopeId) -> Self {
        let path = scope::path(view, scope)
            .into_iter()
            .map(|id| interner.try_resolve(id).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(".");
        Self {
            view,
            interner,
            naming,
            scope,
            path,
            declared: HashSet::new(),
            decls: Vec::new(),
            memories: HashMap::new(),
            renamed: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn view(&self) -> &'a N {
        self.view
    }

    /// The scope this unit is generated from.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Dotted hierarchical path of the scope.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the netlist spelling of a name.
    pub fn name(&self, ident: Ident) -> &'a str {
        self.interner.try_resolve(ident).unwrap_or("?")
    }

    /// Returns the VHDL spelling of a netlist name, warning once per name
    /// that had to be changed.
    pub fn vhdl_name(&mut self, ident: Ident) -> String {
        let original = self.name(ident);
        self.legal(original)
    }

    fn legal(&mut self, original: &str) -> String {
        let legal = legalize(original);
        if legal != original && self.renamed.insert(original.to_string()) {
            let diag = codes::warning_renamed(original, &legal, self.location(original));
            self.diagnostics.push(diag);
        }
        legal
    }

    /// A diagnostic location for an object of this scope.
    pub fn location(&self, object: &str) -> Location {
        Location::object(self.path.clone(), object)
    }

    /// Records a diagnostic against this unit.
    pub fn emit(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    /// Returns `true` if `name` has been declared in this unit.
    pub fn have_declared(&self, name: &str) -> bool {
        self.declared.contains(&name.to_ascii_lowercase())
    }

    /// Reserves a name without declaring anything, as for ports.
    pub fn reserve(&mut self, name: &str) {
        self.declared.insert(name.to_ascii_lowercase());
    }

    /// Adds a declaration unless its name is already taken.
    pub fn declare(&mut self, decl: Decl) {
        if self.declared.insert(decl.name().to_ascii_lowercase()) {
            log::trace!("{}: declare {}", self.path, decl.name());
            self.decls.push(decl);
        }
    }

    /// Declares a memory as an array type plus a signal of that type.
    pub fn declare_memory(&mut self, id: MemoryId) -> String {
        let mem = self.view.memory(id);
        let name = self.vhdl_name(mem.name);
        let type_name = format!("{name}_Type");
        self.declare(Decl::ArrayType {
            name: type_name.clone(),
            low: i64::from(mem.root),
            high: mem.last_index(),
            element: VhdlType::for_width(mem.width, mem.signed),
        });
        self.declare(Decl::Signal {
            name: name.clone(),
            ty: VhdlType::Named(type_name),
        });
        self.memories.insert(id, name.clone());
        name
    }

    /// Returns the VHDL name of a memory declared in this unit.
    pub fn memory_name(&self, id: MemoryId) -> Option<&str> {
        self.memories.get(&id).map(String::as_str)
    }

    /// Returns an unsliced reference to a signal.
    pub fn signal_ref(&mut self, id: SignalId) -> Expr {
        let signal = self.view.signal(id);
        let name = self.vhdl_name(signal.name);
        Expr::reference(name, signal_type(signal))
    }

    /// Returns a reference to an intermediate, declaring it on first use.
    pub fn intermediate(&mut self, name: String, ty: VhdlType) -> Expr {
        if !self.have_declared(&name) {
            self.declare(Decl::Signal {
                name: name.clone(),
                ty: ty.clone(),
            });
        }
        Expr::reference(name, ty)
    }

    /// Name of the intermediate carrying an LPM device's output.
    pub fn lpm_output_name(&mut self, basename: Ident) -> String {
        let name = self.naming.lpm_output(self.name(basename));
        self.legal(&name)
    }

    /// Name of the intermediate carrying a gate's output.
    pub fn logic_output_name(&mut self, basename: Ident) -> String {
        let name = self.naming.logic_output(self.name(basename));
        self.legal(&name)
    }

    /// Returns the declarations in declaration order.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Consumes the context, returning declarations and diagnostics.
    pub fn finish(self) -> (Vec<Decl>, Vec<Diagnostic>) {
        (self.decls, self.diagnostics)
    }
}

/// Returns the VHDL type a signal is declared with.
pub fn signal_type(signal: &Signal) -> VhdlType {
    match signal.data_type {
        DataType::Real => VhdlType::Real,
        _ if signal.is_int => VhdlType::Signed(32),
        _ => VhdlType::for_width(signal.width, signal.signed),
    }
}
