//! The back-end driver: from a validated design to VHDL text.
//!
//! Module scopes are generated independently, each with its own
//! [`UnitContext`], and stitched back together in traversal order.

use crate::ast::{Architecture, Decl, Entity, Port, PortMode, Unit, VhdlType};
use crate::codes;
use crate::context::{signal_type, UnitContext};
use crate::lower::{draw_lpm, draw_logic, lower_expr};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt::Write;
use tessel_common::{ContentHash, InternalError, Interner, TesselResult};
use tessel_config::TesselConfig;
use tessel_diagnostics::{Diagnostic, DiagnosticSink, Location};
use tessel_netlist::{
    scope, validate, Design, NetlistView, PortDirection, ProcessKind, ScopeId, ScopeKind,
    ValidateError,
};
use thiserror::Error;

/// Errors that stop generation as a whole.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The design violates a structural invariant.
    #[error("invalid design: {0}")]
    InvalidDesign(#[from] ValidateError),
    /// A compiler bug.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// The result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The rendered VHDL.
    pub text: String,
    /// XXH3-128 of `text`.
    pub hash: ContentHash,
    /// Number of entity/architecture pairs in `text`.
    pub units: usize,
    /// Number of error diagnostics emitted while generating.
    pub errors: usize,
}

impl Generated {
    /// Returns `true` if any construct could not be generated.
    pub fn failed(&self) -> bool {
        self.errors > 0
    }
}

/// Validates `design` and generates VHDL for it.
///
/// Per-device failures are reported to `sink` and generation carries on;
/// only a structurally invalid design or an internal error aborts.
pub fn generate(
    design: &Design,
    interner: &Interner,
    config: &TesselConfig,
    sink: &DiagnosticSink,
) -> Result<Generated, GenerateError> {
    if let Err(err) = validate(design) {
        sink.emit(codes::error_invalid_design(&err));
        return Err(err.into());
    }
    generate_view(design, interner, config, sink).map_err(GenerateError::from)
}

/// A unit of scheduled work, in scope traversal order.
enum Job {
    /// Generate an entity for a module scope.
    Module(ScopeId),
    /// Report constructs of a scope that produces no unit.
    Report(ScopeId),
}

/// Generates VHDL from any netlist view. The view is assumed valid.
pub fn generate_view<N: NetlistView>(
    view: &N,
    interner: &Interner,
    config: &TesselConfig,
    sink: &DiagnosticSink,
) -> TesselResult<Generated> {
    let jobs = schedule(view, interner)?;
    log::debug!(
        "generating {} scopes{}",
        jobs.len(),
        if config.codegen.parallel { " in parallel" } else { "" }
    );

    let run = |job: &Job| match *job {
        Job::Module(id) => generate_unit(view, interner, config, id).map(|(u, d)| (Some(u), d)),
        Job::Report(id) => Ok((None, report_scope(view, interner, id))),
    };
    let results: Vec<(Option<Unit>, Vec<Diagnostic>)> = if config.codegen.parallel {
        jobs.par_iter().map(run).collect::<Result<_, _>>()?
    } else {
        jobs.iter().map(run).collect::<Result<_, _>>()?
    };

    let errors_before = sink.error_count();
    let mut text = String::new();
    if config.codegen.header {
        text.push_str("-- This VHDL was converted from a netlist by tessel.\n");
        text.push_str("-- Support functions are in ");
        text.push_str(&config.codegen.support_package);
        text.push_str(".\n\n");
    }
    let mut units = 0;
    for (unit, diagnostics) in results {
        sink.extend(diagnostics);
        if let Some(unit) = unit {
            if units > 0 {
                text.push('\n');
            }
            write!(text, "{unit}")?;
            units += 1;
        }
    }
    let errors = sink.error_count() - errors_before;
    log::info!("generated {units} units with {errors} errors");

    Ok(Generated {
        hash: ContentHash::from_bytes(text.as_bytes()),
        text,
        units,
        errors,
    })
}

/// Orders the work: one job per scope that needs any, in pre-order.
///
/// Module scopes of a type already scheduled are skipped, since they would
/// produce an identical entity.
fn schedule<N: NetlistView>(view: &N, interner: &Interner) -> TesselResult<Vec<Job>> {
    let mut seen = HashSet::new();
    let mut jobs = Vec::new();
    for id in view.walk() {
        let s = view.scope(id);
        match s.kind {
            ScopeKind::Module => {
                let Some(type_name) = interner.try_resolve(s.type_name) else {
                    return Err(InternalError::new(format!(
                        "module type name {:?} of {id} is missing from the name table",
                        s.type_name
                    )));
                };
                if seen.insert(s.type_name) {
                    jobs.push(Job::Module(id));
                } else {
                    log::debug!("{id}: entity `{type_name}` already scheduled");
                }
            }
            ScopeKind::Task | ScopeKind::Function => {}
            ScopeKind::Begin | ScopeKind::Fork | ScopeKind::Generate => {
                if !s.logic.is_empty() || !s.lpms.is_empty() || !view.processes_in(id).is_empty()
                {
                    jobs.push(Job::Report(id));
                }
            }
        }
    }
    Ok(jobs)
}

fn scope_path<N: NetlistView>(view: &N, interner: &Interner, id: ScopeId) -> String {
    scope::path(view, id)
        .into_iter()
        .map(|name| interner.try_resolve(name).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(".")
}

fn process_kind(kind: ProcessKind) -> &'static str {
    match kind {
        ProcessKind::Initial => "initial",
        ProcessKind::Always => "always",
    }
}

/// Reports the devices and processes of a begin, fork or generate scope.
fn report_scope<N: NetlistView>(
    view: &N,
    interner: &Interner,
    id: ScopeId,
) -> Vec<Diagnostic> {
    let s = view.scope(id);
    let path = scope_path(view, interner, id);
    let kind = match s.kind {
        ScopeKind::Fork => "fork",
        ScopeKind::Generate => "generate",
        _ => "begin",
    };
    let name = |ident| interner.try_resolve(ident).unwrap_or("?");
    let mut diags = Vec::new();
    for &gate in &s.logic {
        let gate = view.logic(gate);
        diags.push(codes::error_unsupported(
            &format!("{} gate in {kind} scope", gate.ty),
            Location::object(path.clone(), name(gate.name)),
        ));
    }
    for &lpm in &s.lpms {
        let lpm = view.lpm(lpm);
        diags.push(codes::error_unsupported(
            &format!("{} device in {kind} scope", lpm.ty()),
            Location::object(path.clone(), name(lpm.name)),
        ));
    }
    for process in view.processes_in(id) {
        let kind = process_kind(view.process(process).kind);
        diags.push(codes::error_unsupported(
            &format!("{kind} process"),
            Location::scope(path.clone()),
        ));
    }
    diags
}

/// Generates the entity and architecture for one module scope.
fn generate_unit<N: NetlistView>(
    view: &N,
    interner: &Interner,
    config: &TesselConfig,
    id: ScopeId,
) -> TesselResult<(Unit, Vec<Diagnostic>)> {
    let s = view.scope(id);
    let mut ctx = UnitContext::new(view, interner, &config.naming, id);
    let entity_name = ctx.vhdl_name(s.type_name);
    log::debug!("{}: generating entity {entity_name}", ctx.path());

    let mut ports = Vec::with_capacity(s.ports.len());
    for &port in &s.ports {
        let signal = view.signal(port);
        let mode = match signal.port {
            PortDirection::Input => PortMode::In,
            PortDirection::Output => PortMode::Out,
            PortDirection::InOut => PortMode::InOut,
            PortDirection::None => {
                return Err(InternalError::new(format!("port {port} has no direction"))
                    .in_scope(ctx.path()))
            }
        };
        let name = ctx.vhdl_name(signal.name);
        ctx.reserve(&name);
        ports.push(Port {
            name,
            mode,
            ty: signal_type(signal),
        });
    }

    for &sig in &s.signals {
        let signal = view.signal(sig);
        if signal.is_port() || signal.local {
            continue;
        }
        let name = ctx.vhdl_name(signal.name);
        ctx.declare(Decl::Signal {
            name,
            ty: signal_type(signal),
        });
    }

    for &memory in &s.memories {
        ctx.declare_memory(memory);
    }

    for &param in &s.params {
        let param = view.param(param);
        let value = view.expr(param.value);
        let ty = if value.width == 0 {
            VhdlType::Integer
        } else {
            VhdlType::for_width(value.width, value.signed)
        };
        let lowered = lower_expr(&mut ctx, param.value).and_then(|e| match e.ty {
            VhdlType::Real => Ok((VhdlType::Real, e)),
            _ => e.cast(&ty).map(|e| (ty.clone(), e)),
        });
        let name = ctx.vhdl_name(param.name);
        match lowered {
            Ok((ty, value)) => ctx.declare(Decl::Constant { name, ty, value }),
            Err(err) => {
                let location = ctx.location(&name);
                ctx.emit(codes::error_lowering(&err, location));
            }
        }
    }

    let mut stmts = Vec::with_capacity(s.logic.len() + s.lpms.len());
    for &gate in &s.logic {
        match draw_logic(&mut ctx, gate) {
            Ok(stmt) => stmts.push(stmt),
            Err(err) => {
                let location = ctx.location(ctx.name(view.logic(gate).name));
                log::debug!("{location}: {err}");
                ctx.emit(codes::error_lowering(&err, location));
            }
        }
    }
    for &lpm in &s.lpms {
        match draw_lpm(&mut ctx, lpm) {
            Ok(stmt) => stmts.push(stmt),
            Err(err) => {
                let location = ctx.location(ctx.name(view.lpm(lpm).name));
                log::debug!("{location}: {err}");
                ctx.emit(codes::error_lowering(&err, location));
            }
        }
    }

    for process in view.processes_in(id) {
        let kind = process_kind(view.process(process).kind);
        let location = Location::scope(ctx.path());
        ctx.emit(codes::error_unsupported(&format!("{kind} process"), location));
    }

    let comment = format!(
        "Generated from module {} ({})",
        ctx.path(),
        ctx.name(s.type_name)
    );
    let (decls, diagnostics) = ctx.finish();
    log::info!(
        "entity {entity_name}: {} declarations, {} assignments",
        decls.len(),
        stmts.len()
    );

    let unit = Unit {
        comment: Some(comment),
        uses: vec![
            "ieee.std_logic_1164.all".to_string(),
            "ieee.numeric_std.all".to_string(),
            format!("{}.all", config.codegen.support_package),
        ],
        entity: Entity {
            name: entity_name.clone(),
            ports,
        },
        architecture: Architecture {
            name: config.codegen.architecture_name.clone(),
            entity: entity_name,
            decls,
            stmts,
        },
    };
    Ok((unit, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_netlist::{ArithOp, DesignBuilder, LpmKind};

    fn adder(interner: &Interner) -> Design {
        let mut b = DesignBuilder::new(interner);
        let top = b.root_scope("top", "adder", ScopeKind::Module);
        let a = b.port(top, "a", 8, PortDirection::Input);
        let c = b.port(top, "b", 8, PortDirection::Input);
        let q = b.nexus();
        let (na, nb) = (b.signal_nexus(a), b.signal_nexus(c));
        b.lpm(
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
        b.finish()
    }

    #[test]
    fn header_is_optional() {
        let interner = Interner::new();
        let design = adder(&interner);
        let mut config = TesselConfig::default();
        let sink = DiagnosticSink::new();
        let with = generate(&design, &interner, &config, &sink).unwrap();
        config.codegen.header = false;
        let without = generate(&design, &interner, &config, &sink).unwrap();
        assert!(with.text.starts_with("-- This VHDL"));
        assert!(without.text.starts_with("library ieee;"));
        assert_ne!(with.hash, without.hash);
    }

    #[test]
    fn duplicate_module_types_share_an_entity() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        b.scope(top, "u0", "cell", ScopeKind::Module);
        b.scope(top, "u1", "cell", ScopeKind::Module);
        let design = b.finish();
        let sink = DiagnosticSink::new();
        let out = generate(&design, &interner, &TesselConfig::default(), &sink).unwrap();
        assert_eq!(out.units, 2);
        assert_eq!(out.text.matches("entity cell is").count(), 1);
    }

    #[test]
    fn function_scopes_produce_nothing() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        b.scope(top, "f", "f", ScopeKind::Function);
        let design = b.finish();
        let sink = DiagnosticSink::new();
        let out = generate(&design, &interner, &TesselConfig::default(), &sink).unwrap();
        assert_eq!(out.units, 1);
        assert!(!out.failed());
    }

    #[test]
    fn devices_in_begin_scope_are_reported() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        let blk = b.scope(top, "blk", "blk", ScopeKind::Begin);
        let x = b.signal(blk, "x", 1);
        let nx = b.signal_nexus(x);
        let y = b.nexus();
        b.logic(blk, "g0", tessel_netlist::LogicType::Not, 1, vec![y, nx]);
        let design = b.finish();
        let sink = DiagnosticSink::new();
        let out = generate(&design, &interner, &TesselConfig::default(), &sink).unwrap();
        assert!(out.failed());
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::E301);
        assert_eq!(diags[0].message, "unsupported not gate in begin scope");
        assert_eq!(diags[0].location.to_string(), "top.blk.g0");
    }

    #[test]
    fn invalid_design_is_fatal() {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        b.root_scope("top", "top", ScopeKind::Module);
        b.nexus();
        let design = b.finish();
        let sink = DiagnosticSink::new();
        let err = generate(&design, &interner, &TesselConfig::default(), &sink).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidDesign(_)));
        assert_eq!(sink.take_all()[0].code, codes::E101);
    }
}
