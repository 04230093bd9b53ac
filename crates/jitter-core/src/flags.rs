//! Allocation-time flags (spec §6 "Flags").

/// Independent bit-set of allocation-time behavior switches.
///
/// Passed to [`crate::collector::EntropyCollector::alloc`]. All flags default
/// to `false` (nothing disabled) — the collector runs every noise source,
/// the unbiaser, and the stir step unless told otherwise.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectorFlags {
    /// Skip allocating and walking the memory-access scratch buffer (spec §4.2).
    pub disable_memory_access: bool,
    /// Skip the stir step after each 64-bit output (spec §4.7).
    pub disable_stir: bool,
    /// Skip von Neumann unbiasing; each jitter measurement is used directly (spec §4.6).
    pub disable_unbias: bool,
}

impl CollectorFlags {
    /// No flags set: every noise source, the unbiaser, and stir all run.
    pub const NONE: Self = Self {
        disable_memory_access: false,
        disable_stir: false,
        disable_unbias: false,
    };
}
