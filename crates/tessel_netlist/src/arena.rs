//! Typed, append-only storage for netlist entities.
//!
//! Every entity kind lives in its own [`Arena`] inside the
//! [`Design`](crate::Design) and is referred to by a `u32` handle. Handles
//! are never reused; allocation order is declaration order, which keeps
//! generated output stable across runs.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A handle type that can key an [`Arena`].
pub trait ArenaId: Copy + Eq {
    /// Builds a handle from its slot number.
    fn from_raw(index: u32) -> Self;

    /// Slot number of this handle.
    fn as_raw(self) -> u32;

    /// Slot number as a `Vec` index.
    fn slot(self) -> usize {
        self.as_raw() as usize
    }
}

/// Dense storage addressed by handles of type `I`.
///
/// Serialized as a plain list, so a design file stays readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arena<I: ArenaId, T> {
    entries: Vec<T>,
    #[serde(skip)]
    key: PhantomData<fn() -> I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    pub fn new() -> Self {
        Arena {
            entries: Vec::new(),
            key: PhantomData,
        }
    }

    /// Handle the next [`alloc`](Self::alloc) will return.
    pub fn next_id(&self) -> I {
        I::from_raw(self.entries.len() as u32)
    }

    /// Stores `item` and returns its handle.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.entries.push(item);
        id
    }

    /// # Panics
    ///
    /// Panics on a handle from another arena. Validated designs never
    /// contain one; use [`try_get`](Self::try_get) before validation.
    pub fn get(&self, id: I) -> &T {
        &self[id]
    }

    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self[id]
    }

    pub fn try_get(&self, id: I) -> Option<&T> {
        self.entries.get(id.slot())
    }

    pub fn contains(&self, id: I) -> bool {
        id.slot() < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All handles, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        (0..self.entries.len()).map(|slot| I::from_raw(slot as u32))
    }

    /// Handle and entity pairs, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.ids().zip(self.entries.iter())
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Arena::new()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.entries[id.slot()]
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.entries[id.slot()]
    }
}
