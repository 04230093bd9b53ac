//! `rand_core` adapter (spec §9.5 supplement) so an [`EntropyCollector`]
//! composes with the `rand` ecosystem's combinators and call sites.
//!
//! Grounded on `rand_jitterentropy`'s `RandJitterEntropy` (the published
//! Rust binding for the C original this spec distills): a thin
//! `TryRngCore` wrapper with no conditioning of its own layered on top.

use rand_core::TryRngCore;

use crate::collector::EntropyCollector;
use crate::error::JitterError;
use crate::platform::{NanoClock, SystemClock};

/// Adapts an [`EntropyCollector`] to [`rand_core::TryRngCore`].
///
/// Adds no post-processing: every byte comes straight from [`EntropyCollector::read`].
/// A [`JitterError::FipsContinuousFail`] still surfaces as `Self::Error` —
/// this wrapper cannot mask a sticky failure.
pub struct JitterRng<C: NanoClock = SystemClock> {
    collector: EntropyCollector<C>,
}

impl JitterRng<SystemClock> {
    /// Wrap a freshly-allocated real-timer collector.
    pub fn new(collector: EntropyCollector<SystemClock>) -> Self {
        Self { collector }
    }
}

impl<C: NanoClock> JitterRng<C> {
    /// Wrap any collector, real or test-driven.
    pub fn from_collector(collector: EntropyCollector<C>) -> Self {
        Self { collector }
    }

    /// Release the wrapped collector.
    pub fn into_collector(self) -> EntropyCollector<C> {
        self.collector
    }
}

impl<C: NanoClock> TryRngCore for JitterRng<C> {
    type Error = JitterError;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        let mut bytes = [0u8; 4];
        self.collector.read(&mut bytes)?;
        Ok(u32::from_ne_bytes(bytes))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let mut bytes = [0u8; 8];
        self.collector.read(&mut bytes)?;
        Ok(u64::from_ne_bytes(bytes))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.collector.read(dst)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::CollectorFlags;
    use crate::platform::testing::MockClock;

    fn test_flags() -> CollectorFlags {
        CollectorFlags {
            disable_memory_access: true,
            disable_stir: false,
            disable_unbias: true,
        }
    }

    #[test]
    fn try_next_u64_draws_eight_bytes() {
        let clock = MockClock::stepping(37, 1_000_000);
        let collector = EntropyCollector::alloc_with_clock(clock, 1, test_flags()).unwrap();
        let mut rng = JitterRng::from_collector(collector);
        let _ = rng.try_next_u64().expect("collector should yield a value");
    }

    #[test]
    fn try_fill_bytes_fills_arbitrary_lengths() {
        let clock = MockClock::stepping(37, 1_000_000);
        let collector = EntropyCollector::alloc_with_clock(clock, 1, test_flags()).unwrap();
        let mut rng = JitterRng::from_collector(collector);
        let mut buf = [0u8; 13];
        rng.try_fill_bytes(&mut buf).unwrap();
    }
}
