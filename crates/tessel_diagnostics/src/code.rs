//! Stable diagnostic codes such as `E301` or `W301`.
//!
//! The hundreds digit names the phase that raised the diagnostic: `1xx`
//! for design validation, `3xx` for VHDL lowering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter class of a code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    /// `E` codes.
    Error,
    /// `W` codes.
    Warning,
}

/// A diagnostic code. Serialized as its display text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DiagnosticCode {
    /// Letter class.
    pub category: Category,
    /// Number within the class, phase digit first.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        DiagnosticCode { category, number }
    }

    /// Phase digit, e.g. `3` for `E301`.
    pub fn phase(self) -> u16 {
        self.number / 100
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.category {
            Category::Error => 'E',
            Category::Warning => 'W',
        };
        write!(f, "{letter}{:03}", self.number)
    }
}

/// Text that is not a diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadCode(
    /// The rejected text.
    pub String,
);

impl fmt::Display for BadCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a diagnostic code", self.0)
    }
}

impl std::error::Error for BadCode {}

impl FromStr for DiagnosticCode {
    type Err = BadCode;

    fn from_str(s: &str) -> Result<Self, BadCode> {
        let bad = || BadCode(s.to_string());
        let category = match s.as_bytes().first() {
            Some(b'E') => Category::Error,
            Some(b'W') => Category::Warning,
            _ => return Err(bad()),
        };
        let digits = &s[1..];
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let number = digits.parse().map_err(|_| bad())?;
        Ok(DiagnosticCode::new(category, number))
    }
}

impl From<DiagnosticCode> for String {
    fn from(code: DiagnosticCode) -> String {
        code.to_string()
    }
}

impl TryFrom<String> for DiagnosticCode {
    type Error = BadCode;

    fn try_from(s: String) -> Result<Self, BadCode> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_to_three_digits() {
        assert_eq!(DiagnosticCode::new(Category::Error, 301).to_string(), "E301");
        assert_eq!(DiagnosticCode::new(Category::Warning, 7).to_string(), "W007");
        assert_eq!(DiagnosticCode::new(Category::Error, 101).phase(), 1);
    }

    #[test]
    fn parse_accepts_only_code_shapes() {
        let code: DiagnosticCode = "W301".parse().unwrap();
        assert_eq!(code, DiagnosticCode::new(Category::Warning, 301));
        for bad in ["", "E", "X301", "E30", "E3011", "E3a1", "é301"] {
            assert!(bad.parse::<DiagnosticCode>().is_err(), "{bad}");
        }
    }

    #[test]
    fn json_uses_code_text() {
        let code = DiagnosticCode::new(Category::Error, 302);
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"E302\"");
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<DiagnosticCode>("\"Q1\"").is_err());
    }
}
