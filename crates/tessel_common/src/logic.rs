//! Four-state logic bits used by netlist constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One bit of a constant: `0`, `1`, unknown `X`, or high-impedance `Z`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Logic {
    /// Driven low.
    Zero,
    /// Driven high.
    One,
    /// Unknown.
    X,
    /// High impedance.
    Z,
}

impl Logic {
    /// Parses a bit character. Accepts `0`, `1`, `x`/`X` and `z`/`Z`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the IEEE 1164 `std_logic` character for this bit.
    pub fn to_std_logic(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'X',
            Logic::Z => 'Z',
        }
    }

    /// Returns `true` for `0` and `1`.
    pub fn is_known(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_std_logic())
    }
}
