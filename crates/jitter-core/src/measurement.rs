//! Jitter measurement: one folded sample per invocation (spec §4.5).
//!
//! Combines the memory-access noise source (§4.2) and the time-folding
//! function (§4.4): touch the scratch buffer, read the timer, fold the
//! delta since the last reading.

use crate::consts::{MAX_FOLD_LOOP_BIT, MIN_FOLD_LOOP_BIT};
use crate::fold::{fold, loop_shuffle};
use crate::memory::MemoryAccess;
use crate::platform::NanoClock;

/// Take one folded jitter sample.
///
/// `prev_time` is updated in place to the timestamp just read (wrap-around
/// in the delta is intentional and tolerated — unsigned subtraction defines
/// it). `pool_for_shuffle` lets the caller fold the running entropy pool
/// into the shuffler's timestamp so the loop count also depends on
/// accumulated state, not just wall-clock time.
pub fn jitter_measurement<C: NanoClock>(
    mem: &mut MemoryAccess,
    clock: &C,
    prev_time: &mut u64,
    pool_for_shuffle: Option<u64>,
) -> u64 {
    mem.touch();
    let t = clock.now_nanos();
    let delta = t.wrapping_sub(*prev_time);
    *prev_time = t;

    let loop_count = loop_shuffle(t, pool_for_shuffle, MAX_FOLD_LOOP_BIT, MIN_FOLD_LOOP_BIT);
    fold(delta, loop_count as u32)
}
