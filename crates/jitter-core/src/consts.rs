//! Compile-time parameters (spec §6 "Compile-time parameters").

/// Bit-width of one folded sample ("TEB"). Legal range 1..=8; 1 is the canonical build.
pub const TIME_ENTROPY_BITS: u32 = 1;

const _: () = assert!(
    TIME_ENTROPY_BITS >= 1 && TIME_ENTROPY_BITS <= 8,
    "TIME_ENTROPY_BITS must be in 1..=8"
);

/// Width of the entropy pool / single generation output.
pub const DATA_SIZE_BITS: u32 = 64;

/// Stride in bytes between touched locations in the memory-access noise source.
pub const JENT_MEMORY_BLOCKSIZE: usize = 64;

/// Number of distinct locations visited by the memory-access noise source.
pub const JENT_MEMORY_BLOCKS: usize = 512;

/// Memory-access loop iterations performed per jitter sample.
///
/// `JENT_MEMORY_BLOCKSIZE * JENT_MEMORY_BLOCKS` = 32 KiB, comfortably larger
/// than a typical 32 KiB L1 data cache, so the walk reliably spills past L1.
pub const JENT_MEMORY_ACCESSLOOPS: usize = 128;

/// Upper bound on the loop-count shuffler's window width (spec §4.3).
pub const MAX_FOLD_LOOP_BIT: u32 = 4;

/// Lower bound on the loop-count shuffler's minimum power of two (spec §4.3).
pub const MIN_FOLD_LOOP_BIT: u32 = 0;

/// Startup health test: measured iterations (spec §4.11).
pub const TESTLOOPCOUNT: u32 = 300;

/// Startup health test: warm-up iterations discarded before measuring (spec §4.11).
pub const CLEARCACHE: u32 = 100;
