//! Demonstrates the host-side contract around the FIPS 140-2 continuous
//! self-test (spec §4.9): once it trips, the collector is permanently dead
//! and the only valid response is to discard it and allocate a new one.
//!
//! A genuinely stuck output is a pathological platform condition that does
//! not occur in practice on healthy hardware — this example therefore
//! shows the *shape* of handling `FipsContinuousFail` rather than forcing
//! a real trip. The exact trigger (`data == old_data` in the continuous
//! test) is exercised directly, with controlled internal state, by
//! `collector::tests::fips_continuous_test_trips_on_a_repeated_pool_value`
//! in the crate's own test suite.
//!
//! Run: `JITTER_FIPS=1 cargo run --example fips_failure`

use jitter_core::{init, CollectorFlags, EntropyCollector, JitterError};

fn main() {
    init().expect("platform timer unsuitable for jitter entropy");

    let mut collector =
        EntropyCollector::alloc(1, CollectorFlags::NONE).expect("collector allocation failed");

    let mut buf = [0u8; 16];
    for round in 0..5 {
        match collector.read(&mut buf) {
            Ok(_) => println!("round {round}: ok"),
            Err(JitterError::FipsContinuousFail) => {
                println!("round {round}: FIPS continuous test tripped — collector is now dead");
                collector.free();
                collector = EntropyCollector::alloc(1, CollectorFlags::NONE)
                    .expect("replacement collector allocation failed");
                println!("round {round}: allocated a replacement collector");
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert!(!collector.is_fips_failed(), "final collector should be healthy");
}
