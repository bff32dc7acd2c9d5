//! SlotTable: fixed-size index of tri-state slots pointing into the entry arena.

use crate::order_list::EntryKey;
use std::collections::TryReserveError;

/// One position of the open-addressing index.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum Slot {
    /// Never used since the last clear or rebuild.
    #[default]
    Empty,
    /// Held an entry that has since been removed; probing must continue past it.
    Tombstone,
    /// Refers to a live entry owned by the order list.
    Occupied(EntryKey),
}

#[derive(Debug)]
pub(crate) struct SlotTable {
    slots: Vec<Slot>,
    tombstones: usize,
}

impl SlotTable {
    /// All-`Empty` table using the global allocator's infallible path.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity],
            tombstones: 0,
        }
    }

    /// All-`Empty` table; reports allocation failure instead of aborting.
    pub(crate) fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize(capacity, Slot::Empty);
        Ok(Self {
            slots,
            tombstones: 0,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Slot {
        self.slots[idx]
    }

    /// Place `k` at `idx`. The slot must not already be occupied.
    pub(crate) fn occupy(&mut self, idx: usize, k: EntryKey) {
        let slot = &mut self.slots[idx];
        debug_assert!(!matches!(slot, Slot::Occupied(_)), "slot {idx} already occupied");
        if *slot == Slot::Tombstone {
            self.tombstones -= 1;
        }
        *slot = Slot::Occupied(k);
    }

    /// Replace an occupied slot with a tombstone, returning the evicted key.
    pub(crate) fn bury(&mut self, idx: usize) -> Option<EntryKey> {
        match self.slots[idx] {
            Slot::Occupied(k) => {
                self.slots[idx] = Slot::Tombstone;
                self.tombstones += 1;
                Some(k)
            }
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Reset every slot to `Empty`, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.tombstones = 0;
    }

    #[cfg(test)]
    pub(crate) fn occupied(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count()
    }
}
