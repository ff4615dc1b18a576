//! Interned names.
//!
//! Every scope, signal and device name in a design is an [`Ident`]: a dense
//! `u32` index assigned in interning order. That order is also the layout of
//! a design file's name table, so [`Interner::names`] and
//! [`Interner::from_names`] convert between the two without a lookup map.

use lasso::{Key, ThreadedRodeo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interned name of a netlist entity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(u32);

impl Ident {
    /// Builds an `Ident` from its table index. Used by tests and loaders.
    pub const fn from_raw(index: u32) -> Self {
        Ident(index)
    }

    /// Table index of this name.
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `into_usize` and `try_from_usize` are inverses for every `u32`, and
// `try_from_usize` refuses indices that do not fit.
unsafe impl Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Name table shared by the builder, the loader and the code generator.
///
/// Interning takes `&self`, so parallel generation workers can hold a
/// shared reference.
pub struct Interner(ThreadedRodeo<Ident>);

impl Default for Interner {
    fn default() -> Self {
        Interner::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}

impl Interner {
    /// An empty table.
    pub fn new() -> Self {
        Interner(ThreadedRodeo::new())
    }

    /// Rebuilds the table of a design file. `names[i]` becomes `Ident(i)`.
    ///
    /// Returns `None` on a repeated name, which would give two indices one
    /// string.
    pub fn from_names<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = Interner::new();
        names
            .into_iter()
            .enumerate()
            .all(|(index, name)| table.get_or_intern(name.as_ref()).0 as usize == index)
            .then_some(table)
    }

    /// The name table in index order.
    pub fn names(&self) -> Vec<String> {
        (0..self.0.len())
            .filter_map(Ident::try_from_usize)
            .filter_map(|ident| self.try_resolve(ident))
            .map(str::to_owned)
            .collect()
    }

    /// Index of `s`, adding it at the end of the table if new.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.0.get_or_intern(s)
    }

    /// Looks `s` up without adding it.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.0.get(s)
    }

    /// Text of `ident`.
    ///
    /// # Panics
    ///
    /// Panics on an `Ident` from another interner. Prefer
    /// [`try_resolve`](Self::try_resolve) for names read from a file.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.0.resolve(&ident)
    }

    /// Text of `ident`, or `None` if it is past the end of the table.
    pub fn try_resolve(&self, ident: Ident) -> Option<&str> {
        self.0.try_resolve(&ident)
    }

    /// Number of names in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for an empty table.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let names = Interner::new();
        let clk = names.get_or_intern("clk");
        assert_eq!(names.get_or_intern("clk"), clk);
        assert_eq!(names.resolve(clk), "clk");
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn default_and_debug() {
        let names = Interner::default();
        names.get_or_intern("top");
        assert_eq!(format!("{names:?}"), "Interner { len: 1 }");
    }

    #[test]
    fn lookup_does_not_intern() {
        let names = Interner::new();
        assert_eq!(names.get("missing"), None);
        assert!(names.is_empty());
    }

    #[test]
    fn table_survives_a_file_round_trip() {
        let names = Interner::new();
        let top = names.get_or_intern("top");
        let sum = names.get_or_intern("sum");
        assert_eq!((top.as_raw(), sum.as_raw()), (0, 1));

        let table = names.names();
        assert_eq!(table, ["top", "sum"]);
        let rebuilt = Interner::from_names(&table).unwrap();
        assert_eq!(rebuilt.resolve(sum), "sum");
        assert_eq!(rebuilt.try_resolve(Ident::from_raw(2)), None);
    }

    #[test]
    fn repeated_table_entries_are_rejected() {
        assert!(Interner::from_names(["x", "y", "x"]).is_none());
    }
}
