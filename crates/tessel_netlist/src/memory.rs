//! Memories (arrays of registers).

use crate::ids::ScopeId;
use serde::{Deserialize, Serialize};
use tessel_common::Ident;

/// An array of `size` words of `width` bits each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub name: Ident,
    pub scope: ScopeId,
    /// Word width.
    pub width: u32,
    pub signed: bool,
    /// Number of words.
    pub size: u32,
    /// Declared index of the first word.
    pub root: i32,
}

impl Memory {
    /// Returns the declared index of the last word.
    pub fn last_index(&self) -> i64 {
        i64::from(self.root) + i64::from(self.size) - 1
    }
}
