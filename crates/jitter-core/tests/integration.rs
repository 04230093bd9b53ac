//! Integration tests for jitter-core.
//!
//! These exercise the full pipeline end to end: startup health test →
//! allocation → repeated reads → FIPS continuous self-test → lifecycle
//! teardown. Covers spec.md §8 scenarios S1–S4; S5 needs direct access to
//! the private pool field and lives in `collector::tests` instead (see
//! `s5_pool_matches_manual_xor_rotate_accumulation_of_folded_deltas`).

use jitter_core::platform::testing::MockClock;
use jitter_core::{run_startup_test, CollectorFlags, EntropyCollector, JitterError};

fn healthy_clock(len: usize) -> MockClock {
    // Non-constant, non-100-multiple step so it clears every startup check.
    MockClock::new((0..len).map(|i| (i as u64) * 37 + 1).collect())
}

/// S1: a healthy platform timer passes the startup test and real-timer
/// allocation/read succeeds end to end.
#[test]
fn real_timer_passes_startup_and_produces_output() {
    jitter_core::init().expect("the real platform timer should pass the startup test");

    let mut collector =
        EntropyCollector::alloc(1, CollectorFlags::NONE).expect("allocation should succeed");
    let mut buf = [0u8; 64];
    let n = collector.read(&mut buf).expect("read should succeed");
    assert_eq!(n, 64);
}

/// S2: a coarse (constant) timer fails the startup test with `CoarseTimer`.
#[test]
fn constant_timer_fails_startup_with_coarse_timer() {
    let clock = MockClock::constant(5);
    assert_eq!(run_startup_test(&clock), Err(JitterError::CoarseTimer));
}

/// S3: a timer with many backward jumps fails with `NonMonotonic`.
///
/// `run_startup_test` reads the clock twice per iteration (`t1`, `t2`), so
/// the mock sequence is built as explicit `(t1, t2)` pairs, one per
/// iteration, rather than one flat value per loop index.
#[test]
fn frequently_backward_timer_fails_startup() {
    let iterations = 300 + 100;
    let mut ticks = Vec::with_capacity(iterations * 2);
    for i in 0..iterations {
        let backward = i >= 100 && (i - 100) % 20 == 0 && (i - 100) / 20 < 5;
        let t1 = 10_000 + i as u64 * 1000;
        let t2 = if backward { t1 - 2 } else { t1 + 23 };
        ticks.push(t1);
        ticks.push(t2);
    }
    let clock = MockClock::new(ticks);
    assert_eq!(run_startup_test(&clock), Err(JitterError::NonMonotonic));
}

/// S4: end-to-end allocation and draining reads using a mocked timer,
/// covering the multi-round `read` loop across an 8-byte boundary.
#[test]
fn mocked_timer_alloc_read_free_round_trip() {
    let clock = healthy_clock(2_000_000);
    let flags = CollectorFlags {
        disable_memory_access: true,
        disable_stir: false,
        disable_unbias: true,
    };
    let mut collector =
        EntropyCollector::alloc_with_clock(clock, 2, flags).expect("allocation should succeed");

    let mut buf = [0u8; 37];
    let n = collector.read(&mut buf).expect("read should succeed");
    assert_eq!(n, 37);
    assert!(!collector.is_fips_failed());

    collector.free();
}

/// FIPS robustness smoke test (not spec §8's S5 — that scenario, the
/// XOR-rotate accumulation check under `DisableStir`+`DisableUnbias` on a
/// known delta sequence, is covered by
/// `collector::tests::s5_pool_matches_manual_xor_rotate_accumulation_of_folded_deltas`,
/// which needs direct access to the private pool field). With FIPS checking
/// forced on, a collector driven by a genuinely varying timer keeps
/// succeeding across many reads — the continuous test must not spuriously
/// trip on healthy jitter. The exact stuck-output trigger (spec §4.9's
/// `data == old_data` branch) is covered precisely by
/// `collector::tests::fips_continuous_test_trips_on_a_repeated_pool_value`,
/// which has the internal access needed to force that exact condition.
#[test]
fn fips_enabled_collector_survives_many_reads_on_a_healthy_timer() {
    // SAFETY: test runs single-threaded with respect to this var.
    unsafe {
        std::env::set_var("JITTER_FIPS", "1");
    }
    let flags = CollectorFlags {
        disable_memory_access: true,
        disable_stir: false,
        disable_unbias: true,
    };
    let mut collector = EntropyCollector::alloc_with_clock(healthy_clock(2_000_000), 1, flags)
        .expect("alloc should succeed under FIPS mode");

    let mut buf = [0u8; 8];
    for _ in 0..64 {
        collector.read(&mut buf).expect("healthy jitter should not trip the continuous test");
    }
    unsafe {
        std::env::remove_var("JITTER_FIPS");
    }
    assert!(!collector.is_fips_failed());
}
