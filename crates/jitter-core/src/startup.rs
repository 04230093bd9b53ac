//! Startup health test (spec §4.11).
//!
//! Runs before any collector may be used. Reads pairs of timestamps around a
//! single fixed-loop-count fold, discards a warm-up window to let caches and
//! branch predictors settle, then checks that the timer is fine-grained,
//! monotonic (within NTP-adjustment tolerance), and variable enough to carry
//! [`crate::consts::TIME_ENTROPY_BITS`] bits of entropy per sample.

use log::warn;

use crate::consts::{CLEARCACHE, TESTLOOPCOUNT, TIME_ENTROPY_BITS};
use crate::error::JitterError;
use crate::fold::fold;
use crate::platform::NanoClock;

/// Bookkeeping collected by the startup test, returned alongside success so
/// a host can log or display it. `count_var` is gathered but never
/// consulted for a pass/fail decision (spec §9 open question: the original
/// collects it without using it for an error condition; preserved here
/// rather than inventing a threshold).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupTestReport {
    pub time_backwards: u32,
    pub count_mod: u32,
    pub count_var: u32,
    pub delta_sum: u64,
}

/// Run the startup health test against `clock`.
///
/// Returns the diagnostic report on success, or the first rejection reason
/// encountered on failure.
pub fn run_startup_test<C: NanoClock>(clock: &C) -> Result<StartupTestReport, JitterError> {
    let mut time_backwards = 0u32;
    let mut count_mod = 0u32;
    let mut count_var = 0u32;
    let mut delta_sum: u64 = 0;
    let mut old_delta: u64 = 0;

    for i in 0..(TESTLOOPCOUNT + CLEARCACHE) {
        let t1 = clock.now_nanos();
        let _ = fold(t1, 1 << 0);
        let t2 = clock.now_nanos();
        let delta = t2.wrapping_sub(t1);

        if t1 == 0 || t2 == 0 {
            warn!("startup test: timer returned zero");
            return Err(JitterError::NoTimer);
        }
        if delta == 0 {
            warn!("startup test: timer delta was zero");
            return Err(JitterError::CoarseTimer);
        }
        if delta < TIME_ENTROPY_BITS as u64 {
            warn!("startup test: timer delta below entropy-bit floor");
            return Err(JitterError::MinVariation);
        }

        if i < CLEARCACHE {
            continue;
        }

        if t2 <= t1 {
            time_backwards += 1;
        }
        if delta % 100 == 0 {
            count_mod += 1;
        }
        if i > CLEARCACHE {
            if delta != old_delta {
                count_var += 1;
            }
            delta_sum += delta.abs_diff(old_delta);
        }
        old_delta = delta;
    }

    if time_backwards > 3 {
        warn!("startup test: timer moved backwards {time_backwards} times");
        return Err(JitterError::NonMonotonic);
    }
    if delta_sum == 0 {
        warn!("startup test: timer deltas showed no variation");
        return Err(JitterError::VarianceVar);
    }
    let mean_variation = delta_sum / TESTLOOPCOUNT as u64;
    if mean_variation <= TIME_ENTROPY_BITS as u64 {
        warn!("startup test: mean delta variation {mean_variation} too small");
        return Err(JitterError::MinVariationVar);
    }
    if count_mod as f64 > 0.9 * TESTLOOPCOUNT as f64 {
        warn!("startup test: {count_mod}/{TESTLOOPCOUNT} deltas were multiples of 100");
        return Err(JitterError::CoarseTimer);
    }

    Ok(StartupTestReport {
        time_backwards,
        count_mod,
        count_var,
        delta_sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::MockClock;

    /// Build the exact flat call sequence `run_startup_test` will read: two
    /// calls (`t1`, `t2`) per iteration, for `n` iterations, via `per_iter`.
    fn flat_pairs(n: usize, per_iter: impl Fn(usize) -> (u64, u64)) -> Vec<u64> {
        let mut ticks = Vec::with_capacity(n * 2);
        for i in 0..n {
            let (t1, t2) = per_iter(i);
            ticks.push(t1);
            ticks.push(t2);
        }
        ticks
    }

    fn n_iterations() -> usize {
        (TESTLOOPCOUNT + CLEARCACHE) as usize
    }

    #[test]
    fn constant_timer_is_coarse() {
        let clock = MockClock::constant(42);
        assert_eq!(run_startup_test(&clock), Err(JitterError::CoarseTimer));
    }

    #[test]
    fn stepping_by_exactly_100_is_coarse() {
        // Every delta is a multiple of 100 (so the 90% coarseness check
        // rejects it), but not all the *same* multiple — one in ten
        // iterations doubles to 200 — so delta_sum stays nonzero and the
        // VarianceVar/MinVariationVar checks don't preempt CoarseTimer.
        let ticks = flat_pairs(n_iterations(), |i| {
            let delta = if i % 10 == 0 { 200 } else { 100 };
            let t1 = 1000 + i as u64 * 1000;
            (t1, t1 + delta)
        });
        let clock = MockClock::new(ticks);
        assert_eq!(run_startup_test(&clock), Err(JitterError::CoarseTimer));
    }

    #[test]
    fn five_backward_steps_are_nonmonotonic() {
        let clearcache = CLEARCACHE as usize;
        let ticks = flat_pairs(n_iterations(), |i| {
            let backward = i >= clearcache && (i - clearcache) % 80 == 0 && (i - clearcache) / 80 < 5;
            if backward {
                (1000, 997)
            } else {
                (1000, 1017)
            }
        });
        let clock = MockClock::new(ticks);
        assert_eq!(run_startup_test(&clock), Err(JitterError::NonMonotonic));
    }

    #[test]
    fn healthy_varying_timer_passes() {
        // A timer whose delta varies from call to call but is always
        // forward, non-zero, and never a multiple of 100.
        let ticks = flat_pairs(n_iterations(), |i| {
            let t1 = 1000 + i as u64 * 1000;
            let delta = 3 + (i as u64 % 11) * 5;
            (t1, t1 + delta)
        });
        let clock = MockClock::new(ticks);
        let report = run_startup_test(&clock).expect("healthy timer should pass");
        assert!(report.delta_sum > 0);
    }
}
