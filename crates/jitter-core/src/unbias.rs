//! Von Neumann unbiaser (spec §4.6).
//!
//! Pairs consecutive jitter samples and keeps the first of each differing
//! pair, discarding ties. Justified by the assumed independence of
//! successive samples. The returned `TEB`-bit chunk counts as "one bit" of
//! output for pool-accumulation purposes, win or lose on the bias.

use crate::measurement::jitter_measurement;
use crate::memory::MemoryAccess;
use crate::platform::NanoClock;

/// Produce one unbiased sample.
///
/// If `disabled`, returns a single raw jitter measurement with no pairing.
/// Otherwise takes pairs of samples until they differ, returning the first
/// of the differing pair.
pub fn unbiased_sample<C: NanoClock>(
    mem: &mut MemoryAccess,
    clock: &C,
    prev_time: &mut u64,
    pool_for_shuffle: Option<u64>,
    disabled: bool,
) -> u64 {
    if disabled {
        return jitter_measurement(mem, clock, prev_time, pool_for_shuffle);
    }
    loop {
        let a = jitter_measurement(mem, clock, prev_time, pool_for_shuffle);
        let b = jitter_measurement(mem, clock, prev_time, pool_for_shuffle);
        if a != b {
            return a;
        }
    }
}
