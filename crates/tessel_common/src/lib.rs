//! Shared foundational types for the Tessel netlist back end.
//!
//! Interned identifiers, four-state logic bits for constants, content hashing
//! of generated output, and the internal-error result type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod logic;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use result::{InternalError, TesselResult};
