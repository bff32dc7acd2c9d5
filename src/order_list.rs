//! OrderList: entry arena with an index-linked list in insertion order.
//!
//! Entries live in a `SlotMap` and link to their neighbours by `EntryKey`
//! rather than by pointer. The slot table only stores keys into this arena,
//! so the list is the single owner of every entry.

use crate::Value;
use slotmap::{new_key_type, SlotMap};
use std::collections::TryReserveError;

new_key_type! {
    /// Stable arena index of a live entry.
    pub struct EntryKey;
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: Box<[u8]>,
    pub(crate) hash: u64,
    pub(crate) value: Value,
    prev: Option<EntryKey>,
    next: Option<EntryKey>,
}

impl Entry {
    #[inline]
    pub(crate) fn matches(&self, key: &[u8], hash: u64) -> bool {
        self.hash == hash && *self.key == *key
    }
}

#[derive(Debug)]
pub(crate) struct OrderList {
    entries: SlotMap<EntryKey, Entry>,
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
}

impl OrderList {
    pub(crate) fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub(crate) fn get(&self, k: EntryKey) -> Option<&Entry> {
        self.entries.get(k)
    }

    pub(crate) fn get_mut(&mut self, k: EntryKey) -> Option<&mut Entry> {
        self.entries.get_mut(k)
    }

    /// Make room for `additional` more entries without aborting on OOM.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve(additional)
    }

    /// Append a new entry at the tail. O(1). Call `try_reserve` first when
    /// allocation failure must be reported.
    pub(crate) fn push_back(&mut self, key: Box<[u8]>, hash: u64, value: Value) -> EntryKey {
        let prev = self.tail;
        let k = self.entries.insert(Entry {
            key,
            hash,
            value,
            prev,
            next: None,
        });
        match prev {
            Some(p) => {
                self.entries
                    .get_mut(p)
                    .expect("tail must refer to a live entry")
                    .next = Some(k);
            }
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        k
    }

    /// Detach `k` from the list and release it from the arena. O(1).
    pub(crate) fn unlink(&mut self, k: EntryKey) -> Option<Entry> {
        let entry = self.entries.remove(k)?;

        match entry.prev {
            Some(p) => {
                self.entries
                    .get_mut(p)
                    .expect("prev link must refer to a live entry")
                    .next = entry.next;
            }
            None => self.head = entry.next,
        }
        match entry.next {
            Some(n) => {
                self.entries
                    .get_mut(n)
                    .expect("next link must refer to a live entry")
                    .prev = entry.prev;
            }
            None => self.tail = entry.prev,
        }

        Some(entry)
    }

    /// Drop every entry and forget head/tail.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.head = None;
        self.tail = None;
    }

    pub(crate) fn iter(&self) -> Links<'_> {
        Links {
            list: self,
            cursor: self.head,
            remaining: self.entries.len(),
        }
    }
}

/// Walks the list from head to tail, yielding arena keys with their entries.
pub(crate) struct Links<'a> {
    list: &'a OrderList,
    cursor: Option<EntryKey>,
    remaining: usize,
}

impl<'a> Iterator for Links<'a> {
    type Item = (EntryKey, &'a Entry);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let entry = self
            .list
            .entries
            .get(k)
            .expect("list links must refer to live entries");
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((k, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Links<'_> {}
