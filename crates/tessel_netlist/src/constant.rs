//! Constants driven onto nexuses.

use crate::ids::NexusId;
use serde::{Deserialize, Serialize};
use tessel_common::Logic;

/// The value of a constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// Four-state bits, least significant first.
    Bits(Vec<Logic>),
    /// A real number.
    Real(f64),
}

/// A literal value from the design's constant pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub width: u32,
    pub signed: bool,
    pub value: ConstValue,
    pub nexus: NexusId,
}

impl Constant {
    /// Returns the bits least significant first, or `None` for a real.
    pub fn bits(&self) -> Option<&[Logic]> {
        match &self.value {
            ConstValue::Bits(bits) => Some(bits),
            ConstValue::Real(_) => None,
        }
    }

    /// Returns the value as an unsigned integer if every bit is known and
    /// the value fits in 64 bits.
    pub fn as_u64(&self) -> Option<u64> {
        let bits = self.bits()?;
        let mut value = 0u64;
        for (i, bit) in bits.iter().enumerate() {
            match bit {
                Logic::Zero => {}
                Logic::One if i < 64 => value |= 1 << i,
                _ => return None,
            }
        }
        Some(value)
    }
}

/// Parses a bit string written most significant bit first.
pub fn parse_bits(msb_first: &str) -> Option<Vec<Logic>> {
    msb_first.chars().rev().map(Logic::from_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Constant {
        let bits = parse_bits(s).unwrap();
        Constant {
            width: bits.len() as u32,
            signed: false,
            value: ConstValue::Bits(bits),
            nexus: NexusId::from_raw(0),
        }
    }

    #[test]
    fn parse_is_lsb_first() {
        let v = parse_bits("10z").unwrap();
        assert_eq!(v, vec![Logic::Z, Logic::Zero, Logic::One]);
        assert!(parse_bits("12").is_none());
    }

    #[test]
    fn known_value() {
        assert_eq!(bits("0101").as_u64(), Some(5));
        assert_eq!(bits("1x").as_u64(), None);
    }

    #[test]
    fn high_zero_bits_beyond_64_are_fine() {
        let s = format!("{}1", "0".repeat(70));
        assert_eq!(bits(&s).as_u64(), Some(1));
        let s = format!("1{}", "0".repeat(70));
        assert_eq!(bits(&s).as_u64(), None);
    }

    #[test]
    fn real_has_no_bits() {
        let c = Constant {
            width: 64,
            signed: true,
            value: ConstValue::Real(1.5),
            nexus: NexusId::from_raw(0),
        };
        assert!(c.bits().is_none());
    }
}
