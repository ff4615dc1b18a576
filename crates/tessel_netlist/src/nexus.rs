//! The connection fabric.
//!
//! A [`Nexus`] is a connection point. It lists every device pin attached to
//! it, in attachment order, together with the strength each pin drives.

use crate::ids::{ConstId, LogicId, LpmId, SignalId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tessel_common::Ident;

/// Strength with which a pin drives a value onto its nexus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DriveStrength {
    /// Not driving (inputs and disabled tri-states).
    HiZ,
    /// Weak drive.
    Weak,
    /// Pull drive.
    Pull,
    /// Normal gate output drive.
    Strong,
    /// Supply net drive.
    Supply,
}

/// The entity that owns a nexus pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinOwner {
    /// A signal; signals always attach with pin 0.
    Signal(SignalId),
    /// A logic gate.
    Logic(LogicId),
    /// A constant from the design's constant pool.
    Const(ConstId),
    /// An LPM device.
    Lpm(LpmId),
}

impl fmt::Display for PinOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinOwner::Signal(id) => id.fmt(f),
            PinOwner::Logic(id) => id.fmt(f),
            PinOwner::Const(id) => id.fmt(f),
            PinOwner::Lpm(id) => id.fmt(f),
        }
    }
}

/// One attachment of a device port to a nexus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NexusPin {
    /// The device owning the pin.
    pub owner: PinOwner,
    /// The port index on the owner.
    pub pin: u32,
    /// Strength when driving `0`.
    pub drive0: DriveStrength,
    /// Strength when driving `1`.
    pub drive1: DriveStrength,
}

impl NexusPin {
    /// Returns `true` if this pin drives the nexus with any strength.
    pub fn is_driver(&self) -> bool {
        self.drive0 != DriveStrength::HiZ || self.drive1 != DriveStrength::HiZ
    }
}

/// A connection point linking device pins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nexus {
    /// Optional name assigned by the front end.
    pub name: Option<Ident>,
    /// Attached pins in attachment order.
    pub pins: Vec<NexusPin>,
}

impl Nexus {
    /// Returns the number of attached pins.
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Returns the pin at `index`, if any.
    pub fn pin(&self, index: usize) -> Option<&NexusPin> {
        self.pins.get(index)
    }

    /// Iterates over the signals attached to this nexus, in pin order.
    pub fn signals(&self) -> impl Iterator<Item = SignalId> + '_ {
        self.pins.iter().filter_map(|p| match p.owner {
            PinOwner::Signal(id) => Some(id),
            _ => None,
        })
    }

    /// Iterates over the pins that drive this nexus.
    pub fn drivers(&self) -> impl Iterator<Item = &NexusPin> + '_ {
        self.pins.iter().filter(|p| p.is_driver())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(owner: PinOwner, pin: u32, drive: DriveStrength) -> NexusPin {
        NexusPin {
            owner,
            pin,
            drive0: drive,
            drive1: drive,
        }
    }

    #[test]
    fn signals_in_pin_order() {
        let nexus = Nexus {
            name: None,
            pins: vec![
                pin(PinOwner::Signal(SignalId::from_raw(4)), 0, DriveStrength::HiZ),
                pin(PinOwner::Lpm(LpmId::from_raw(0)), 0, DriveStrength::Strong),
                pin(PinOwner::Signal(SignalId::from_raw(1)), 0, DriveStrength::HiZ),
            ],
        };
        let sigs: Vec<_> = nexus.signals().collect();
        assert_eq!(sigs, vec![SignalId::from_raw(4), SignalId::from_raw(1)]);
    }

    #[test]
    fn drivers_skip_inputs() {
        let nexus = Nexus {
            name: None,
            pins: vec![
                pin(PinOwner::Lpm(LpmId::from_raw(0)), 1, DriveStrength::HiZ),
                pin(PinOwner::Logic(LogicId::from_raw(2)), 0, DriveStrength::Strong),
            ],
        };
        let drivers: Vec<_> = nexus.drivers().map(|p| p.owner).collect();
        assert_eq!(drivers, vec![PinOwner::Logic(LogicId::from_raw(2))]);
    }

    #[test]
    fn strength_ordering() {
        assert!(DriveStrength::Supply > DriveStrength::Strong);
        assert!(DriveStrength::HiZ < DriveStrength::Weak);
    }

    #[test]
    fn owner_display() {
        assert_eq!(PinOwner::Const(ConstId::from_raw(7)).to_string(), "const#7");
    }
}
