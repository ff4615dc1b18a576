//! VHDL back end for Tessel netlists.
//!
//! Lowers the structural part of an elaborated netlist (LPM devices and
//! primitive gates) to concurrent VHDL signal assignments, one
//! entity/architecture pair per module type.
//!
//! # Usage
//!
//! ```ignore
//! use tessel_vhdl::generate;
//! let out = generate(&design, &interner, &config, &sink)?;
//! std::fs::write("out.vhd", &out.text)?;
//! ```

pub mod ast;
pub mod codes;
pub mod context;
pub mod error;
pub mod generate;
pub mod lower;
pub mod names;
pub mod nexus;
mod print;

pub use context::UnitContext;
pub use error::LowerError;
pub use generate::{generate, generate_view, GenerateError, Generated};
pub use lower::{draw_logic, draw_lpm, lpm_output};
pub use nexus::nexus_to_ref;
