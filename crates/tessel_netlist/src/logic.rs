//! Logic gates.

use crate::ids::{ExprId, NexusId, ScopeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tessel_common::Ident;

/// The function of a logic gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicType {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
    Not,
    Buf,
    Bufz,
    Bufif0,
    Bufif1,
    Notif0,
    Notif1,
    Nmos,
    Pmos,
    Pulldown,
    Pullup,
    /// User-defined primitive.
    Udp,
}

impl fmt::Display for LogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogicType::And => "and",
            LogicType::Nand => "nand",
            LogicType::Or => "or",
            LogicType::Nor => "nor",
            LogicType::Xor => "xor",
            LogicType::Xnor => "xnor",
            LogicType::Not => "not",
            LogicType::Buf => "buf",
            LogicType::Bufz => "bufz",
            LogicType::Bufif0 => "bufif0",
            LogicType::Bufif1 => "bufif1",
            LogicType::Notif0 => "notif0",
            LogicType::Notif1 => "notif1",
            LogicType::Nmos => "nmos",
            LogicType::Pmos => "pmos",
            LogicType::Pulldown => "pulldown",
            LogicType::Pullup => "pullup",
            LogicType::Udp => "udp",
        };
        f.write_str(s)
    }
}

/// A single-output gate. Pin 0 is the output, pins 1.. the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicGate {
    pub name: Ident,
    pub scope: ScopeId,
    pub ty: LogicType,
    /// Width of the output and of every input.
    pub width: u32,
    pub pins: Vec<NexusId>,
    /// Rise, fall and turn-off delays.
    pub delays: [Option<ExprId>; 3],
}

impl LogicGate {
    /// Returns the output nexus, if the gate has any pins.
    pub fn output(&self) -> Option<NexusId> {
        self.pins.first().copied()
    }

    /// Returns the input nexuses in pin order.
    pub fn inputs(&self) -> &[NexusId] {
        self.pins.get(1..).unwrap_or(&[])
    }
}
