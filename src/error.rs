use std::collections::TryReserveError;

/// Failures reported by [`OrderedHashMap`](crate::OrderedHashMap).
///
/// Every variant is returned with the map left exactly as it was before the
/// call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),
    #[error("requested capacity {requested} cannot hold {used} entries")]
    RejectedTooSmall { requested: usize, used: usize },
    #[error("key is not present in the map")]
    KeyNotFound,
}

/// Successful result of [`OrderedHashMap::put`](crate::OrderedHashMap::put).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PutOutcome {
    /// A new entry was appended to the insertion order.
    Inserted,
    /// The key was already present; its value was replaced in place.
    Overwrote,
}
