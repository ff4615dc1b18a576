//! Signal definitions.
//!
//! A [`Signal`] is a named bit vector declared in a scope. Every signal is
//! attached to exactly one nexus, always through pin 0.

use crate::ids::{NexusId, ScopeId};
use serde::{Deserialize, Serialize};
use tessel_common::Ident;

/// The net or variable type of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    /// A procedural variable.
    Reg,
    /// A plain net.
    Wire,
    /// A tri-state net.
    Tri,
    /// A tri-state net pulled low when undriven.
    Tri0,
    /// A tri-state net pulled high when undriven.
    Tri1,
    /// A wired-AND net.
    Wand,
    /// A wired-OR net.
    Wor,
    /// A net tied to ground.
    Supply0,
    /// A net tied to power.
    Supply1,
}

/// Port direction of a signal, if it is a port of its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Not a port.
    None,
    /// Input port.
    Input,
    /// Output port.
    Output,
    /// Bidirectional port.
    InOut,
}

impl PortDirection {
    /// Returns `true` for any direction other than [`PortDirection::None`].
    pub fn is_port(self) -> bool {
        self != PortDirection::None
    }
}

/// Value domain of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Four-state logic vector.
    Logic,
    /// Two-state bit vector.
    Bool,
    /// Floating point.
    Real,
}

/// A named bit vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// The signal's basename.
    pub name: Ident,
    /// The declaring scope.
    pub scope: ScopeId,
    /// Net or variable type.
    pub ty: SignalType,
    /// Port direction within the declaring scope.
    pub port: PortDirection,
    /// Value domain.
    pub data_type: DataType,
    /// Width in bits; at least 1.
    pub width: u32,
    /// Whether arithmetic on the signal is signed.
    pub signed: bool,
    /// Declared as `integer` rather than a vector.
    pub is_int: bool,
    /// Compiler-generated; never referenced by name in output.
    pub local: bool,
    /// Declared index of the least significant bit.
    pub lsb_index: i32,
    /// Index step from the lsb towards the msb: `1` or `-1`.
    pub lsb_dist: i32,
    /// The nexus this signal is attached to.
    pub nexus: NexusId,
}

impl Signal {
    /// Returns the declared index of the most significant bit.
    pub fn msb_index(&self) -> i64 {
        i64::from(self.lsb_index) + i64::from(self.lsb_dist) * (i64::from(self.width) - 1)
    }

    /// Returns `true` if the signal is a port of its scope.
    pub fn is_port(&self) -> bool {
        self.port.is_port()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(width: u32, lsb_index: i32, lsb_dist: i32) -> Signal {
        Signal {
            name: Ident::from_raw(0),
            scope: ScopeId::from_raw(0),
            ty: SignalType::Wire,
            port: PortDirection::None,
            data_type: DataType::Logic,
            width,
            signed: false,
            is_int: false,
            local: false,
            lsb_index,
            lsb_dist,
            nexus: NexusId::from_raw(0),
        }
    }

    #[test]
    fn msb_of_descending_range() {
        assert_eq!(sig(8, 0, 1).msb_index(), 7);
    }

    #[test]
    fn msb_of_ascending_range() {
        // reg [0:7] x
        assert_eq!(sig(8, 7, -1).msb_index(), 0);
    }

    #[test]
    fn port_flag() {
        let mut s = sig(1, 0, 1);
        assert!(!s.is_port());
        s.port = PortDirection::InOut;
        assert!(s.is_port());
    }
}
