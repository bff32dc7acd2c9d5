//! Compile-time tuning constants shared by every layer of the map.

/// Number of slots a freshly constructed map starts with.
pub const INITIAL_CAPACITY: usize = 8;

/// Right shift applied to the perturbation term after every probe step.
pub const PERTURB_SHIFT: u32 = 5;

/// Growth threshold as a fraction: grow once `used / allocated >= 3/5`.
pub const GROWTH_NUMERATOR: usize = 3;
pub const GROWTH_DENOMINATOR: usize = 5;

/// Multiplier applied to every key byte by the hash function.
pub const HASH_PARAM_A: u64 = 1_794_967_309;
/// Offset added for every key byte by the hash function.
pub const HASH_PARAM_B: u64 = 7;

/// `true` when `used` entries in `allocated` slots reach the growth threshold.
#[inline]
pub(crate) fn at_growth_threshold(used: usize, allocated: usize) -> bool {
    used.saturating_mul(GROWTH_DENOMINATOR) >= allocated.saturating_mul(GROWTH_NUMERATOR)
}
