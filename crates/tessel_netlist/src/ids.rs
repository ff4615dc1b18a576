//! Handles for every netlist entity kind.
//!
//! Each handle is a `u32` slot in the matching [`Arena`](crate::Arena) of a
//! [`Design`](crate::Design). Handles of different kinds do not mix.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_ids {
    ($($(#[$meta:meta])* $name:ident => $label:literal;)*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn from_raw(index: u32) -> Self {
                $name(index)
            }

            pub const fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                $name::from_raw(index)
            }

            fn as_raw(self) -> u32 {
                $name::as_raw(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    )*};
}

define_ids! {
    /// A module, task, function or block scope.
    ScopeId => "scope";
    SignalId => "signal";
    /// A connection point joining device pins and signal bits.
    NexusId => "nexus";
    LpmId => "lpm";
    LogicId => "logic";
    /// An entry of the design's constant pool.
    ConstId => "const";
    /// An array of words.
    MemoryId => "memory";
    EventId => "event";
    ParamId => "param";
    ExprId => "expr";
    StmtId => "stmt";
    ProcessId => "process";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_kind() {
        assert_eq!(LpmId::from_raw(3).to_string(), "lpm#3");
        assert_eq!(ScopeId::from_raw(0).to_string(), "scope#0");
        assert_eq!(NexusId::from_raw(42).as_raw(), 42);
    }

    #[test]
    fn handles_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&ExprId::from_raw(9)).unwrap();
        assert_eq!(json, "9");
        let back: ExprId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExprId::from_raw(9));
    }
}
