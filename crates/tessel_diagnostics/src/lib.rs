//! Diagnostic records, codes, and rendering for the Tessel back end.
//!
//! Code generation reports every local failure as a [`Diagnostic`] anchored
//! at a netlist [`Location`] (scope path plus the offending object). The
//! thread-safe [`DiagnosticSink`] collects them so a single run reports every
//! problem, and [`TerminalRenderer`] prints one line per diagnostic.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod location;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use location::Location;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
