//! # jitter-core
//!
//! A non-physical TRNG core: entropy harvested from CPU/memory timing
//! jitter, folded down to a few bits per sample, von Neumann unbiased,
//! accumulated into a 64-bit pool, and continuously self-tested per
//! FIPS 140-2.
//!
//! This crate is deliberately **not** a daemon. It never parses arguments,
//! forks, handles signals, writes a PID file, or polls a kernel entropy
//! pool — those are a host's job (see the `jitter-cli` crate in this
//! workspace for a minimal one). What it does own: the startup health
//! test, the noise sources, the conditioning pipeline, and the collector
//! lifecycle.
//!
//! ## Quick start
//!
//! ```no_run
//! use jitter_core::{init, EntropyCollector, CollectorFlags};
//!
//! init().expect("platform timer unsuitable for jitter entropy");
//! let mut collector = EntropyCollector::alloc(1, CollectorFlags::NONE)
//!     .expect("collector allocation failed");
//!
//! let mut buf = [0u8; 32];
//! collector.read(&mut buf).expect("read failed");
//! ```
//!
//! ## Architecture
//!
//! Memory-access noise + time-folding → jitter measurement → von Neumann
//! unbiaser → pool accumulation → stir → FIPS continuous test → `read`.
//!
//! Every stage is generic over [`platform::NanoClock`] so the whole pipeline
//! can be driven deterministically in tests without real hardware jitter.

pub mod collector;
pub mod consts;
pub mod error;
pub mod flags;
pub mod fold;
pub mod measurement;
pub mod memory;
pub mod platform;
pub mod rng;
pub mod startup;
pub mod stir;
pub mod unbias;

pub use collector::EntropyCollector;
pub use error::JitterError;
pub use flags::CollectorFlags;
pub use platform::{fips_mode_enabled, NanoClock, SystemClock};
pub use rng::JitterRng;
pub use startup::{run_startup_test, StartupTestReport};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the startup health test against the real platform timer (spec §4.11).
///
/// Must succeed before any [`EntropyCollector`] is allocated. Returns the
/// diagnostic report on success.
pub fn init() -> Result<StartupTestReport, JitterError> {
    run_startup_test(&SystemClock)
}
