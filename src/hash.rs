//! Byte-string hash used for slot placement.

use crate::config::{HASH_PARAM_A, HASH_PARAM_B};

/// Hashes `key` by accumulating `A * b + B` over every byte with wrapping
/// arithmetic. Pure: identical input always yields the identical hash.
#[inline]
pub fn hash_bytes(key: &[u8]) -> u64 {
    key.iter().fold(0u64, |hash, &b| {
        hash.wrapping_add(HASH_PARAM_A.wrapping_mul(u64::from(b)).wrapping_add(HASH_PARAM_B))
    })
}
