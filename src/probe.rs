//! Probe resolver: perturbation-based open addressing over a `SlotTable`.
//!
//! The sequence starts at `hash % allocated` and steps with
//! `idx = 5 * idx + perturb + 1`, shifting `perturb` right by
//! `PERTURB_SHIFT` each time. After `allocated` perturbed steps it sweeps
//! every slot linearly once, so any free slot is always reachable and a
//! table without `Empty` slots still terminates. Insertion and lookup walk
//! the identical sequence.

use crate::config::PERTURB_SHIFT;
use crate::order_list::{EntryKey, OrderList};
use crate::slot_table::{Slot, SlotTable};

/// How a probe treats tombstones it walks over.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum TombstonePolicy {
    /// Lookup/removal: a tombstone is "something else", keep probing.
    Skip,
    /// Insertion: the first tombstone is an acceptable landing slot.
    Reuse,
}

/// Outcome of resolving a key against the slot table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    /// The key lives at this slot.
    Found(usize, EntryKey),
    /// The key is absent; this is where it would be inserted.
    Vacant(usize),
    /// Every slot was visited without a match or a landing spot.
    Exhausted,
}

/// Deterministic sequence of slot indices for a hash.
#[derive(Clone, Debug)]
pub(crate) struct ProbeSeq {
    idx: usize,
    perturb: u64,
    len: usize,
    perturbed_left: usize,
    linear_left: usize,
}

impl ProbeSeq {
    pub(crate) fn new(hash: u64, len: usize) -> Self {
        if len == 0 {
            return Self {
                idx: 0,
                perturb: 0,
                len,
                perturbed_left: 0,
                linear_left: 0,
            };
        }
        Self {
            idx: (hash % len as u64) as usize,
            perturb: hash,
            len,
            perturbed_left: len,
            linear_left: len,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let cur = self.idx;
        if self.perturbed_left > 0 {
            self.perturbed_left -= 1;
            let step = (cur as u64)
                .wrapping_mul(5)
                .wrapping_add(self.perturb)
                .wrapping_add(1);
            self.idx = (step % self.len as u64) as usize;
            self.perturb >>= PERTURB_SHIFT;
            Some(cur)
        } else if self.linear_left > 0 {
            self.linear_left -= 1;
            self.idx = (cur + 1) % self.len;
            Some(cur)
        } else {
            None
        }
    }
}

/// Resolve `key`/`hash` to a slot.
///
/// With `Skip`, probing stops at the matching entry or the first `Empty`
/// slot. With `Reuse`, the first tombstone passed is remembered and
/// returned as `Vacant` unless the key turns up further along; this keeps
/// one live slot per key while still recycling tombstones.
pub(crate) fn resolve(
    slots: &SlotTable,
    entries: &OrderList,
    key: &[u8],
    hash: u64,
    policy: TombstonePolicy,
) -> Probe {
    let mut first_tombstone = None;
    for idx in ProbeSeq::new(hash, slots.len()) {
        match slots.get(idx) {
            Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(idx)),
            Slot::Tombstone => {
                if policy == TombstonePolicy::Reuse && first_tombstone.is_none() {
                    first_tombstone = Some(idx);
                }
            }
            Slot::Occupied(k) => {
                let hit = entries
                    .get(k)
                    .map(|e| e.matches(key, hash))
                    .unwrap_or(false);
                if hit {
                    return Probe::Found(idx, k);
                }
            }
        }
    }
    match first_tombstone {
        Some(idx) => Probe::Vacant(idx),
        None => Probe::Exhausted,
    }
}

/// First `Empty` slot on `hash`'s sequence; used when reindexing entries
/// that are already known to be unique.
pub(crate) fn first_empty(slots: &SlotTable, hash: u64) -> Option<usize> {
    ProbeSeq::new(hash, slots.len()).find(|&idx| slots.get(idx) == Slot::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_bytes;
    use std::collections::BTreeSet;

    #[test]
    fn sequence_starts_at_hash_mod_len() {
        let mut seq = ProbeSeq::new(13, 8);
        assert_eq!(seq.next(), Some(5));
        // 5 * 5 + 13 + 1 = 39, 39 % 8 = 7
        assert_eq!(seq.next(), Some(7));
        // perturb = 13 >> 5 = 0: 5 * 7 + 0 + 1 = 36, 36 % 8 = 4
        assert_eq!(seq.next(), Some(4));
    }

    /// Invariant: every slot of a power-of-two table appears in the sequence.
    #[test]
    fn sequence_covers_every_slot() {
        for len in [1usize, 2, 8, 16, 64] {
            for hash in [0u64, 1, 7, 0xdead_beef, u64::MAX] {
                let seen: BTreeSet<usize> = ProbeSeq::new(hash, len).collect();
                assert_eq!(seen.len(), len, "len {len} hash {hash}");
            }
        }
    }

    /// Invariant: non-power-of-two tables are still fully covered by the linear sweep.
    #[test]
    fn sequence_covers_odd_sizes() {
        for len in [3usize, 5, 7, 12, 100] {
            let seen: BTreeSet<usize> = ProbeSeq::new(hash_bytes(b"x"), len).collect();
            assert_eq!(seen.len(), len);
        }
    }

    #[test]
    fn sequence_is_bounded() {
        assert_eq!(ProbeSeq::new(42, 8).count(), 16);
        assert_eq!(ProbeSeq::new(42, 0).count(), 0);
    }

    fn table_with(keys: &[&[u8]], len: usize) -> (SlotTable, OrderList) {
        let mut slots = SlotTable::new(len);
        let mut entries = OrderList::new();
        for key in keys {
            let hash = hash_bytes(key);
            let idx = match resolve(&slots, &entries, key, hash, TombstonePolicy::Reuse) {
                Probe::Vacant(idx) => idx,
                other => panic!("unexpected probe: {other:?}"),
            };
            let k = entries.push_back((*key).into(), hash, 0);
            slots.occupy(idx, k);
        }
        (slots, entries)
    }

    #[test]
    fn resolve_finds_inserted_keys() {
        let (slots, entries) = table_with(&[b"a", b"b", b"c"], 8);
        for key in [&b"a"[..], b"b", b"c"] {
            assert!(matches!(
                resolve(&slots, &entries, key, hash_bytes(key), TombstonePolicy::Skip),
                Probe::Found(..)
            ));
        }
        assert!(matches!(
            resolve(&slots, &entries, b"zz", hash_bytes(b"zz"), TombstonePolicy::Skip),
            Probe::Vacant(_)
        ));
    }

    /// Invariant: a lookup walks past a tombstone to reach a colliding key further along.
    #[test]
    fn skip_policy_walks_past_tombstones() {
        // "ab" and "ba" share a hash and so share a probe sequence.
        let (mut slots, mut entries) = table_with(&[b"ab", b"ba"], 8);
        let hash = hash_bytes(b"ab");
        let (idx, k) = match resolve(&slots, &entries, b"ab", hash, TombstonePolicy::Skip) {
            Probe::Found(idx, k) => (idx, k),
            other => panic!("unexpected probe: {other:?}"),
        };
        slots.bury(idx);
        entries.unlink(k);

        assert!(matches!(
            resolve(&slots, &entries, b"ba", hash, TombstonePolicy::Skip),
            Probe::Found(..)
        ));
        // A fresh key on the same sequence reuses the tombstone.
        assert_eq!(
            resolve(&slots, &entries, b"zz", hash, TombstonePolicy::Reuse),
            Probe::Vacant(idx)
        );
    }

    /// Invariant: insertion never lands on a tombstone when the key lives further along.
    #[test]
    fn reuse_policy_prefers_existing_key_over_tombstone() {
        let (mut slots, mut entries) = table_with(&[b"ab", b"ba"], 8);
        let hash = hash_bytes(b"ab");
        if let Probe::Found(idx, k) = resolve(&slots, &entries, b"ab", hash, TombstonePolicy::Skip) {
            slots.bury(idx);
            entries.unlink(k);
        }
        assert!(matches!(
            resolve(&slots, &entries, b"ba", hash, TombstonePolicy::Reuse),
            Probe::Found(..)
        ));
    }

    /// Invariant: a table with no `Empty` slot still terminates.
    #[test]
    fn full_table_lookup_terminates() {
        let (slots, entries) = table_with(&[b"a", b"b", b"c", b"d"], 4);
        assert_eq!(
            resolve(&slots, &entries, b"zz", hash_bytes(b"zz"), TombstonePolicy::Skip),
            Probe::Exhausted
        );
        assert_eq!(first_empty(&slots, 0), None);
    }
}
