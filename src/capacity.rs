//! Capacity manager: explicit `reserve`, load-factor growth and tombstone purge.
//!
//! Every reallocation builds a complete replacement slot table from the
//! order list before installing it, so a failed allocation leaves the map
//! untouched and insertion order never changes.

use crate::config::at_growth_threshold;
use crate::error::TableError;
use crate::ordered_hash_map::OrderedHashMap;
use crate::probe;
use crate::slot_table::SlotTable;
use log::{debug, trace};

impl OrderedHashMap {
    /// Resize the index to exactly `capacity` slots.
    ///
    /// Rejects a capacity below the current entry count (or zero). Asking for
    /// the current capacity is a no-op; otherwise every live entry is reindexed
    /// in insertion order and tombstones are dropped.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), TableError> {
        let used = self.len();
        if capacity == 0 || capacity < used {
            return Err(TableError::RejectedTooSmall {
                requested: capacity,
                used,
            });
        }
        if capacity == self.capacity() {
            return Ok(());
        }
        debug!(
            "resizing slot table {} -> {} ({} live, {} tombstones)",
            self.capacity(),
            capacity,
            used,
            self.slots.tombstones()
        );
        self.rebuild(capacity)
    }

    /// Called by `put` before probing: double at the growth threshold, or
    /// purge tombstones in place when they alone push the table over it.
    pub(crate) fn make_room(&mut self) -> Result<(), TableError> {
        let allocated = self.capacity();
        let used = self.len();
        if at_growth_threshold(used, allocated) {
            self.reserve(allocated.saturating_mul(2))
        } else if at_growth_threshold(used + self.slots.tombstones(), allocated) {
            trace!(
                "purging {} tombstones at capacity {}",
                self.slots.tombstones(),
                allocated
            );
            self.rebuild(allocated)
        } else {
            Ok(())
        }
    }

    fn rebuild(&mut self, capacity: usize) -> Result<(), TableError> {
        let mut fresh = SlotTable::try_new(capacity)?;
        for (k, entry) in self.entries.iter() {
            let idx = probe::first_empty(&fresh, entry.hash)
                .expect("replacement table holds at least as many slots as entries");
            fresh.occupy(idx, k);
        }
        self.slots = fresh;
        Ok(())
    }
}
