//! Platform primitives (spec §4.1): a high-resolution monotonic timer and the
//! "is FIPS mode enabled" predicate. Memory allocation (`zalloc`/`zfree`) is
//! handled directly by [`crate::collector`] via `Vec<u8>` + [`zeroize`], since
//! safe Rust has no need for a pluggable allocator abstraction there.
//!
//! The timer is pluggable through [`NanoClock`] so the startup health test and
//! the FIPS continuous test can be driven deterministically in tests (spec §8
//! properties 6 and 7) without depending on real hardware jitter.

use std::sync::OnceLock;
use std::time::Instant;

/// A monotonic nanosecond timer.
///
/// Implementations must have resolution finer than [`crate::consts::TIME_ENTROPY_BITS`]
/// bits, i.e. consecutive calls must observably differ on real hardware.
pub trait NanoClock: Send + Sync {
    /// Current time in nanoseconds, relative to an arbitrary fixed epoch.
    fn now_nanos(&self) -> u64;
}

/// The real platform timer: `Instant` relative to a process-local epoch.
///
/// Mirrors the teacher crate's `mach_time()` fallback path (monotonic
/// `Instant` elapsed-since-first-call) rather than reading the ARM/x86 cycle
/// counter directly, since that requires per-arch unsafe assembly the spec
/// does not mandate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl NanoClock for SystemClock {
    fn now_nanos(&self) -> u64 {
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        let epoch = EPOCH.get_or_init(Instant::now);
        epoch.elapsed().as_nanos() as u64
    }
}

/// Whether the FIPS 140-2 continuous test should run (spec §4.1, §4.9).
///
/// Enabled at compile time via the `fips` feature, or at runtime via the
/// `JITTER_FIPS` environment variable (any non-empty value). A host daemon
/// wrapper is expected to set this from its own FIPS-mode configuration.
pub fn fips_mode_enabled() -> bool {
    cfg!(feature = "fips") || std::env::var_os("JITTER_FIPS").is_some()
}

/// Deterministic clocks for tests (spec §8 properties 6–7, scenarios S2/S3/S5).
pub mod testing {
    use super::NanoClock;
    use std::sync::{Arc, Mutex};

    /// A clock that plays back a fixed sequence of timestamps, then repeats
    /// its last value forever (so tests don't need to size the sequence
    /// exactly to the number of calls the algorithm under test will make).
    pub struct MockClock {
        ticks: Mutex<(Vec<u64>, usize)>,
        /// Total number of `now_nanos()` calls, tracked independently of
        /// `ticks`' playback position so it keeps counting past the end of
        /// the sequence (spec §8 property 8: exact jitter-measurement counts).
        calls: Mutex<usize>,
    }

    impl MockClock {
        /// Build a clock that returns `ticks[0], ticks[1], ..., ticks[n-1], ticks[n-1], ...`.
        pub fn new(ticks: Vec<u64>) -> Self {
            assert!(!ticks.is_empty(), "MockClock needs at least one tick");
            Self {
                ticks: Mutex::new((ticks, 0)),
                calls: Mutex::new(0),
            }
        }

        /// A clock that always returns the same constant value.
        pub fn constant(value: u64) -> Self {
            Self::new(vec![value])
        }

        /// A clock that steps by a fixed amount on every call, starting at 0.
        pub fn stepping(step: u64, count: usize) -> Self {
            Self::new((0..count as u64).map(|i| i * step).collect())
        }

        /// Total number of times `now_nanos()` has been called so far.
        pub fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl NanoClock for MockClock {
        fn now_nanos(&self) -> u64 {
            *self.calls.lock().unwrap() += 1;
            let mut guard = self.ticks.lock().unwrap();
            let (ticks, idx) = &mut *guard;
            let value = ticks[(*idx).min(ticks.len() - 1)];
            if *idx < ticks.len() - 1 {
                *idx += 1;
            }
            value
        }
    }

    /// Blanket forwarding impl so a test can keep an `Arc<MockClock>` handle
    /// to inspect [`MockClock::call_count`] after handing a clone to an
    /// [`crate::collector::EntropyCollector`], which otherwise takes
    /// ownership of its clock.
    impl NanoClock for Arc<MockClock> {
        fn now_nanos(&self) -> u64 {
            self.as_ref().now_nanos()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockClock;
    use super::*;

    #[test]
    fn system_clock_is_monotonic_and_advances() {
        let clock = SystemClock;
        let a = clock.now_nanos();
        let b = clock.now_nanos();
        assert!(b >= a);
    }

    #[test]
    fn mock_clock_constant_always_same() {
        let clock = MockClock::constant(42);
        assert_eq!(clock.now_nanos(), 42);
        assert_eq!(clock.now_nanos(), 42);
        assert_eq!(clock.now_nanos(), 42);
    }

    #[test]
    fn mock_clock_stepping_advances_by_step() {
        let clock = MockClock::stepping(100, 5);
        let readings: Vec<u64> = (0..5).map(|_| clock.now_nanos()).collect();
        assert_eq!(readings, vec![0, 100, 200, 300, 400]);
    }

    #[test]
    fn mock_clock_repeats_last_value_past_sequence_end() {
        let clock = MockClock::new(vec![1, 2, 3]);
        assert_eq!(clock.now_nanos(), 1);
        assert_eq!(clock.now_nanos(), 2);
        assert_eq!(clock.now_nanos(), 3);
        assert_eq!(clock.now_nanos(), 3);
        assert_eq!(clock.now_nanos(), 3);
    }

    #[test]
    fn fips_mode_enabled_reads_env_var() {
        // SAFETY: test runs single-threaded with respect to this var (no
        // other test in this module touches JITTER_FIPS).
        unsafe {
            std::env::remove_var("JITTER_FIPS");
        }
        let without = fips_mode_enabled();
        unsafe {
            std::env::set_var("JITTER_FIPS", "1");
        }
        let with = fips_mode_enabled();
        unsafe {
            std::env::remove_var("JITTER_FIPS");
        }
        assert!(with || cfg!(feature = "fips"));
        let _ = without;
    }
}
