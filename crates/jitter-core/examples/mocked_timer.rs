//! Drives a collector with a deterministic mock timer instead of the real
//! platform clock — the same technique the test suite uses to make an
//! otherwise-nondeterministic jitter source reproducible.
//!
//! Run: `cargo run --example mocked_timer`

use jitter_core::platform::testing::MockClock;
use jitter_core::{CollectorFlags, EntropyCollector};

fn main() {
    // A varying, non-constant, non-100-multiple step so the collector
    // behaves like it would on a real, healthy timer.
    let clock = MockClock::new((0..100_000).map(|i: u64| i * 41 + 7).collect());

    let mut collector = EntropyCollector::alloc_with_clock(clock, 1, CollectorFlags::NONE)
        .expect("collector allocation failed");

    for round in 0..4 {
        let mut buf = [0u8; 16];
        collector.read(&mut buf).expect("read failed");
        print!("round {round}: ");
        for b in &buf {
            print!("{b:02x}");
        }
        println!();
    }
}
