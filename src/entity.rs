//! Small-integer id allocation with reuse, independent of the spatial index.

use std::collections::BTreeSet;

use bit_vec::BitVec;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> u32 {
        id.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    alive: BitVec,
    freelist: BTreeSet<u32>,
    counter: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the smallest freed id, or a fresh one. Ids start at 1.
    pub fn allocate(&mut self) -> EntityId {
        let index = match self.freelist.pop_first() {
            Some(index) => index,
            None => {
                self.counter += 1;
                self.counter
            }
        };
        self.set_alive(index, true);
        EntityId(index)
    }

    /// Returns `false` when `id` was not alive, in which case nothing changes.
    pub fn free(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            warn!("freeing id {} which is not alive", id.0);
            return false;
        }
        self.set_alive(id.0, false);
        self.freelist.insert(id.0);
        true
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.alive.get(id.0 as usize).unwrap_or(false)
    }

    pub fn alive_count(&self) -> usize {
        self.counter as usize - self.freelist.len()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_alive(&mut self, index: u32, value: bool) {
        let index = index as usize;
        if index >= self.alive.len() {
            // grow by half again, at least 256 bits
            let target = (self.alive.len() + self.alive.len() / 2).max(256).max(index + 1);
            self.alive.grow(target - self.alive.len(), false);
        }
        self.alive.set(index, value);
    }
}
