//! ordered-hashmap: a single-threaded open-addressing map from byte-string
//! keys to `i32` values that remembers insertion order.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small hash table whose probing, deletion and growth rules can
//!   each be reasoned about on their own.
//! - Layers:
//!   - `hash`: pure byte-sum hash `h += A * b + B` with wrapping arithmetic.
//!   - `order_list`: `SlotMap` arena owning every entry, threaded into a
//!     doubly-linked list by arena keys in insertion order.
//!   - `slot_table`: fixed-size index of `Empty | Tombstone | Occupied(key)`
//!     slots; it never owns entries.
//!   - `probe`: resolves a key to a slot with the perturbation recurrence
//!     `idx = 5 * idx + perturb + 1`, `perturb >>= 5`.
//!   - `ordered_hash_map` + `capacity`: the public `OrderedHashMap` with
//!     put/get/pop/remove/contains/clear and reserve/growth.
//!
//! Constraints
//! - Single-threaded; callers serialize access themselves.
//! - One live slot per key. Removed entries leave a tombstone so colliding
//!   keys further along the probe sequence stay reachable.
//! - Growth is decided before each put: once `used / allocated >= 3/5`
//!   the index doubles. Capacity never shrinks on its own.
//! - Every failure leaves the map exactly as it was.
//!
//! Tombstone policy
//! - Lookups and removals probe past tombstones.
//! - Insertion remembers the first tombstone it passes and lands there
//!   unless the key itself turns up further along the sequence.
//! - When tombstones alone push the table past the growth threshold, `put`
//!   rebuilds the index at the same capacity instead of growing.
//!
//! Reindexing
//! - Every resize builds a complete replacement index by walking the order
//!   list, then swaps it in. Insertion order and entry identity never change.
//!
//! Notes and non-goals
//! - Keys are byte strings and values are `i32`; there are no generic
//!   key/value parameters.
//! - No persistence and no concurrent access.
//! - Overwriting a key keeps its position in iteration order.

pub mod config;
pub mod error;
pub mod hash;
pub mod iter;
mod capacity;
mod order_list;
mod ordered_hash_map;
mod ordered_hash_map_proptest;
mod probe;
mod slot_table;

/// Value type stored by the map.
pub type Value = i32;

// Public surface
pub use error::{PutOutcome, TableError};
pub use ordered_hash_map::OrderedHashMap;
