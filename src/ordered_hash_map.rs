//! OrderedHashMap: byte-string keys to `i32` values with insertion-order traversal.

use crate::config::INITIAL_CAPACITY;
use crate::error::{PutOutcome, TableError};
use crate::hash::hash_bytes;
use crate::iter::{Iter, Keys, Values};
use crate::order_list::{EntryKey, OrderList};
use crate::probe::{self, Probe, TombstonePolicy};
use crate::slot_table::SlotTable;
use crate::Value;
use core::fmt;
use log::trace;

pub struct OrderedHashMap {
    pub(crate) slots: SlotTable,
    pub(crate) entries: OrderList, // owns every entry; slots only index into it
}

impl OrderedHashMap {
    /// Empty map with `INITIAL_CAPACITY` slots.
    pub fn new() -> Self {
        Self {
            slots: SlotTable::new(INITIAL_CAPACITY),
            entries: OrderList::new(),
        }
    }

    /// Empty map with exactly `capacity` slots.
    ///
    /// A zero capacity is rejected; allocation failure is reported instead of
    /// aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::RejectedTooSmall {
                requested: 0,
                used: 0,
            });
        }
        Ok(Self {
            slots: SlotTable::try_new(capacity)?,
            entries: OrderList::new(),
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Number of slots in the index.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn find(&self, key: &[u8]) -> Option<(usize, EntryKey)> {
        let hash = hash_bytes(key);
        match probe::resolve(&self.slots, &self.entries, key, hash, TombstonePolicy::Skip) {
            Probe::Found(idx, k) => Some((idx, k)),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.find(key.as_ref()).is_some()
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<Value> {
        let (_, k) = self.find(key.as_ref())?;
        self.entries.get(k).map(|e| e.value)
    }

    /// Insert `key -> value`, or overwrite the value of an existing key in place.
    ///
    /// Growth is decided before the key is probed, so the slot is always
    /// resolved against the final capacity. Overwriting keeps the entry's
    /// position in insertion order. On error the map is unchanged.
    pub fn put(&mut self, key: impl AsRef<[u8]>, value: Value) -> Result<PutOutcome, TableError> {
        let key = key.as_ref();
        let hash = hash_bytes(key);
        // Every allocation an insert needs happens before growth, so none can
        // fail after the index has been replaced. Overwrites allocate nothing.
        let owned = match self.find(key) {
            Some(_) => None,
            None => {
                let owned = copy_key(key)?;
                self.entries.try_reserve(1)?;
                Some(owned)
            }
        };
        self.make_room()?;

        match probe::resolve(&self.slots, &self.entries, key, hash, TombstonePolicy::Reuse) {
            Probe::Found(_, k) => {
                self.entries
                    .get_mut(k)
                    .expect("occupied slot must refer to a live entry")
                    .value = value;
                Ok(PutOutcome::Overwrote)
            }
            Probe::Vacant(idx) => {
                let owned = owned.expect("a key absent before growth is copied up front");
                let k = self.entries.push_back(owned, hash, value);
                self.slots.occupy(idx, k);
                Ok(PutOutcome::Inserted)
            }
            Probe::Exhausted => unreachable!("growth keeps at least one free slot before insertion"),
        }
    }

    /// Remove `key` and return its value. The vacated slot becomes a tombstone.
    pub fn pop(&mut self, key: impl AsRef<[u8]>) -> Option<Value> {
        let (idx, k) = self.find(key.as_ref())?;
        let buried = self.slots.bury(idx);
        debug_assert_eq!(buried, Some(k));
        let entry = self
            .entries
            .unlink(k)
            .expect("occupied slot must refer to a live entry");
        Some(entry.value)
    }

    /// Like [`pop`](Self::pop) but discards the value.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Result<(), TableError> {
        self.pop(key).map(|_| ()).ok_or(TableError::KeyNotFound)
    }

    /// Drop every entry and reset all slots to empty. Capacity is kept.
    pub fn clear(&mut self) {
        trace!(
            "clearing {} entries, keeping {} slots",
            self.entries.len(),
            self.slots.len()
        );
        self.entries.clear();
        self.slots.clear();
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.entries.iter())
    }

    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_> {
        Values::new(self.iter())
    }
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>, TableError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(key.len())?;
    buf.extend_from_slice(key);
    Ok(buf.into_boxed_slice())
}

impl Default for OrderedHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderedHashMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (String::from_utf8_lossy(k), v)))
            .finish()
    }
}

impl<'a> IntoIterator for &'a OrderedHashMap {
    type Item = (&'a [u8], Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
