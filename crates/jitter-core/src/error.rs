//! Error taxonomy for the jitter entropy collector (spec §7).
//!
//! All variants are fatal to the operation that produced them; `FipsContinuousFail`
//! is additionally sticky at the collector level (see [`crate::collector::EntropyCollector`]).

use std::fmt;

/// Errors surfaced by [`crate::startup::run_startup_test`], [`crate::collector`]
/// allocation, and `read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JitterError {
    /// The platform timer never produced two different readings.
    NoTimer,
    /// The timer advances in steps too coarse to carry entropy.
    CoarseTimer,
    /// Per-sample time delta never exceeded [`crate::consts::TIME_ENTROPY_BITS`].
    MinVariation,
    /// The timer moved backwards more often than the NTP-adjustment tolerance allows.
    NonMonotonic,
    /// Successive deltas never varied (the "variation of variation" is zero).
    VarianceVar,
    /// The mean variation of deltas did not exceed the time-entropy-bit floor.
    MinVariationVar,
    /// Collector allocation failed.
    AllocFail,
    /// `read` was called without a live collector.
    ///
    /// The C original's `read` takes a nullable collector pointer; a safe
    /// `EntropyCollector::read(&mut self, ...)` makes that state
    /// unrepresentable; this variant is kept so the error taxonomy stays a
    /// faithful, complete mirror of spec §7 for any future FFI-facing entry
    /// point that does take an `Option<&mut EntropyCollector>`.
    CollectorAbsent,
    /// The FIPS 140-2 continuous test observed two identical consecutive outputs.
    /// Sticky: once returned, every subsequent `read` on the same collector
    /// returns this error again.
    FipsContinuousFail,
}

impl fmt::Display for JitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTimer => write!(f, "no usable high-resolution timer"),
            Self::CoarseTimer => write!(f, "timer resolution too coarse for jitter entropy"),
            Self::MinVariation => write!(f, "timer delta never exceeded the entropy-bit floor"),
            Self::NonMonotonic => write!(f, "timer moved backwards beyond tolerance"),
            Self::VarianceVar => write!(f, "timer deltas showed no variation"),
            Self::MinVariationVar => write!(f, "mean timer delta variation too small"),
            Self::AllocFail => write!(f, "failed to allocate entropy collector"),
            Self::CollectorAbsent => write!(f, "read() called without a live collector"),
            Self::FipsContinuousFail => write!(f, "FIPS 140-2 continuous test failed: stuck output"),
        }
    }
}

impl std::error::Error for JitterError {}
