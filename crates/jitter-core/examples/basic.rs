//! Minimal end-to-end use of the collector against the real platform timer.
//!
//! Run: `cargo run --example basic`

use jitter_core::{init, CollectorFlags, EntropyCollector};

fn main() {
    init().expect("platform timer unsuitable for jitter entropy");

    let mut collector =
        EntropyCollector::alloc(1, CollectorFlags::NONE).expect("collector allocation failed");

    let mut buf = [0u8; 32];
    collector.read(&mut buf).expect("read failed");

    print!("32 bytes (hex): ");
    for b in &buf {
        print!("{b:02x}");
    }
    println!();

    collector.free();
}
