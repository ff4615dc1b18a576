//! Named events and edge probes.

use crate::ids::{NexusId, ScopeId};
use serde::{Deserialize, Serialize};
use tessel_common::Ident;

/// A synchronization point.
///
/// `pins` holds the watched nexuses: first the `any` edge ones, then the
/// negative edge ones, then the positive edge ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: Ident,
    pub scope: ScopeId,
    pub any: u32,
    pub neg: u32,
    pub pos: u32,
    pub pins: Vec<NexusId>,
}

impl Event {
    /// Returns the nexuses watched for any change.
    pub fn any_pins(&self) -> &[NexusId] {
        self.slice(0, self.any)
    }

    /// Returns the nexuses watched for a negative edge.
    pub fn neg_pins(&self) -> &[NexusId] {
        self.slice(self.any, self.neg)
    }

    /// Returns the nexuses watched for a positive edge.
    pub fn pos_pins(&self) -> &[NexusId] {
        self.slice(self.any + self.neg, self.pos)
    }

    /// Returns `true` if the counts account for exactly the listed pins.
    pub fn is_consistent(&self) -> bool {
        (self.any as usize + self.neg as usize + self.pos as usize) == self.pins.len()
    }

    fn slice(&self, start: u32, len: u32) -> &[NexusId] {
        let start = start as usize;
        self.pins
            .get(start..start + len as usize)
            .unwrap_or(&[])
    }
}
