#![cfg(test)]

// Property tests for OrderedHashMap kept inside the crate so they can check
// the slot table against the order list directly.

use crate::probe::{self, Probe, TombstonePolicy};
use crate::slot_table::Slot;
use crate::{OrderedHashMap, PutOutcome, TableError, Value};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, Value),
    Get(usize),
    Pop(usize),
    Remove(usize),
    Contains(String),
    Reserve(usize),
    Clear,
    Iterate,
}

fn arb_ops(pool: Vec<String>) -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    let idxs: Vec<usize> = (0..pool.len()).collect();
    let idx = proptest::sample::select(idxs);
    let contains_pool = proptest::sample::select(pool.clone());
    let op = prop_oneof![
        4 => (idx.clone(), any::<Value>()).prop_map(|(i, v)| OpI::Put(i, v)),
        2 => idx.clone().prop_map(OpI::Get),
        2 => idx.clone().prop_map(OpI::Pop),
        1 => idx.clone().prop_map(OpI::Remove),
        1 => prop_oneof![
            contains_pool.prop_map(|s: String| s),
            "[a-z]{0,5}".prop_map(|s| s)
        ]
        .prop_map(OpI::Contains),
        1 => (0usize..80).prop_map(OpI::Reserve),
        1 => Just(OpI::Clear),
        1 => Just(OpI::Iterate),
    ];
    proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(arb_ops)
}

// Every key is a permutation of the same bytes, so every key has the same
// hash and the same probe sequence.
fn arb_colliding_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    let perms: Vec<String> = [
        "aabbc", "ababc", "abbac", "cabab", "bacab", "cbaab", "abcab", "bbaac", "acbba",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    proptest::sample::subsequence(perms, 1..=9).prop_flat_map(arb_ops)
}

/// Model: key -> value plus key insertion order.
#[derive(Default)]
struct Model {
    values: HashMap<String, Value>,
    order: Vec<String>,
}

impl Model {
    fn put(&mut self, k: &str, v: Value) -> PutOutcome {
        match self.values.insert(k.to_string(), v) {
            Some(_) => PutOutcome::Overwrote,
            None => {
                self.order.push(k.to_string());
                PutOutcome::Inserted
            }
        }
    }

    fn pop(&mut self, k: &str) -> Option<Value> {
        let v = self.values.remove(k)?;
        self.order.retain(|o| o != k);
        Some(v)
    }

    fn clear(&mut self) {
        self.values.clear();
        self.order.clear();
    }
}

// Structural invariants that must hold between any two operations.
fn check_structure(sut: &OrderedHashMap) -> Result<(), TestCaseError> {
    let cap = sut.capacity();
    prop_assert!(sut.len() <= cap);
    prop_assert_eq!(sut.slots.occupied(), sut.len());

    let tombstones = (0..cap).filter(|&i| sut.slots.get(i) == Slot::Tombstone).count();
    prop_assert_eq!(tombstones, sut.slots.tombstones());

    // Each entry is found by probing from its own hash, at a slot pointing back to it.
    for (k, entry) in sut.entries.iter() {
        match probe::resolve(&sut.slots, &sut.entries, &entry.key, entry.hash, TombstonePolicy::Skip) {
            Probe::Found(idx, found) => {
                prop_assert_eq!(found, k);
                prop_assert_eq!(sut.slots.get(idx), Slot::Occupied(k));
            }
            other => prop_assert!(false, "entry unreachable: {:?}", other),
        }
    }
    Ok(())
}

fn run_state_machine(pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut sut = OrderedHashMap::new();
    let mut model = Model::default();

    for op in ops {
        let cap_before = sut.capacity();
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                prop_assert_eq!(sut.put(k, v), Ok(model.put(k, v)));
                prop_assert!(sut.capacity() >= cap_before, "put never shrinks");
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.values.get(k).copied());
            }
            OpI::Pop(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.pop(k), model.pop(k));
                prop_assert_eq!(sut.pop(k), None);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let expected = model.pop(k).map(|_| ()).ok_or(TableError::KeyNotFound);
                prop_assert_eq!(sut.remove(k), expected);
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.values.contains_key(&s));
            }
            OpI::Reserve(n) => {
                let res = sut.reserve(n);
                if n == 0 || n < model.values.len() {
                    let rejected = matches!(res, Err(TableError::RejectedTooSmall { .. }));
                    prop_assert!(rejected, "reserve({}) accepted with {} entries", n, model.values.len());
                    prop_assert_eq!(sut.capacity(), cap_before);
                } else {
                    prop_assert_eq!(res, Ok(()));
                    prop_assert_eq!(sut.capacity(), n);
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap_before);
            }
            OpI::Iterate => {
                let keys: Vec<String> = sut
                    .keys()
                    .map(|k| String::from_utf8(k.to_vec()).expect("keys are utf-8"))
                    .collect();
                prop_assert_eq!(&keys, &model.order);
                for (k, v) in sut.iter() {
                    let k = std::str::from_utf8(k).expect("keys are utf-8");
                    prop_assert_eq!(Some(&v), model.values.get(k));
                }
            }
        }

        // Size invariant: len equals the number of pool keys reporting present.
        let present = pool
            .iter()
            .filter(|k| sut.contains(k))
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        prop_assert_eq!(sut.len(), present);
        prop_assert_eq!(sut.len(), model.values.len());
        prop_assert_eq!(sut.is_empty(), model.values.is_empty());
        check_structure(&sut)?;
    }
    Ok(())
}

// Property: State-machine equivalence against a HashMap + insertion-order model.
// Invariants exercised across random operation sequences:
// - put reports Inserted/Overwrote exactly as the model does.
// - get/contains/pop/remove agree with the model; a second pop is NotFound.
// - iteration yields the model's insertion order; overwrite keeps position.
// - reserve rejects sizes below len (and zero) without changing capacity.
// - clear keeps capacity; put never shrinks it.
// - every live entry is reachable from its hash and occupies exactly one slot.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(&pool, ops)?;
    }
}

// Property: Same state machine when every key shares one probe sequence.
// This stresses tombstone handling along a single collision chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_colliding_scenario()) {
        run_state_machine(&pool, ops)?;
    }
}
