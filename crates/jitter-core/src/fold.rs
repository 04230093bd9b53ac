//! Time-folding function and loop-count shuffler (spec §4.3, §4.4).
//!
//! `fold` is the timed operation: its observable duration is the jitter
//! signal being measured, so the outer loop must never be hoisted, unrolled
//! away, or constant-folded by the compiler. [`std::hint::black_box`] is the
//! optimization barrier — a language-level equivalent of compiling this
//! function at `-O0`, localized instead of crate-wide (spec §9 design notes).

use std::hint::black_box;

use crate::consts::TIME_ENTROPY_BITS;

/// One fold pass: XOR every `TEB`-bit window of `t`, from least to most
/// significant, onto each other.
///
/// `XOR_{i=0..N-1} ((t >> (TEB*i)) & ((1<<TEB) - 1))`, `N = 64 / TEB`.
fn fold_pass(t: u64, teb: u32) -> u64 {
    let n = 64 / teb;
    let mask = (1u64 << teb) - 1;
    let mut folded = 0u64;
    for i in 0..n {
        folded ^= (t >> (teb * i)) & mask;
    }
    folded
}

/// Fold `t` into `TIME_ENTROPY_BITS` bits, repeating the fold pass
/// `loop_count` times. Only the last pass's result is returned; earlier
/// passes exist solely to consume time (spec §4.4).
///
/// Must not be optimized: the outer loop is the timed workload.
pub fn fold(t: u64, loop_count: u32) -> u64 {
    let mut value = black_box(t);
    for _ in 0..black_box(loop_count).max(1) {
        value = fold_pass(black_box(value), TIME_ENTROPY_BITS);
    }
    black_box(value)
}

/// Derive a sample-dependent loop iteration count so no noise operation runs
/// for a constant number of iterations (spec §4.3).
///
/// `bits` is the window width used to fold the timestamp (<= 6); `min` is the
/// minimum power of two added to the result. Output is always in
/// `[1<<min, (1<<min) + (1<<bits))`.
pub fn loop_shuffle(now_nanos: u64, pool: Option<u64>, bits: u32, min: u32) -> u64 {
    let mut t = now_nanos;
    if let Some(pool) = pool {
        t ^= pool;
    }
    let mut shuffle: u64 = 0;
    for _ in 0..(64 / bits) {
        shuffle ^= t & ((1u64 << bits) - 1);
        t >>= bits;
    }
    shuffle + (1u64 << min)
}
