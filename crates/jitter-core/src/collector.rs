//! The entropy collector: generator driver (§4.8), FIPS continuous test
//! (§4.9), `read` entry point (§4.10), and lifecycle (§4.12).

use log::{debug, warn};
use zeroize::Zeroize;

use crate::consts::TIME_ENTROPY_BITS;
use crate::error::JitterError;
use crate::flags::CollectorFlags;
use crate::measurement::jitter_measurement;
use crate::memory::MemoryAccess;
use crate::platform::{fips_mode_enabled, NanoClock, SystemClock};
use crate::stir::{accumulate, stir};
use crate::unbias::unbiased_sample;

/// A live jitter entropy collector.
///
/// Generic over [`NanoClock`] so tests can drive it with
/// [`crate::platform::testing::MockClock`]; real callers get [`SystemClock`]
/// through [`EntropyCollector::alloc`]. Strictly sequential: `&mut self` on
/// every operation that touches state rules out the concurrent-access
/// undefined behavior the spec calls out (§5).
pub struct EntropyCollector<C: NanoClock = SystemClock> {
    mem: MemoryAccess,
    clock: C,
    prev_time: u64,
    data: u64,
    old_data: u64,
    fips_failed: bool,
    osr: u32,
    flags: CollectorFlags,
    /// Test-only override so the FIPS continuous test can be exercised
    /// deterministically without touching process-global environment state.
    force_fips: bool,
}

impl EntropyCollector<SystemClock> {
    /// Allocate a collector backed by the real platform timer.
    ///
    /// `osr` of `0` is promoted to `1`. Runs one generation pass to seed
    /// `data` with non-zero state and primes the FIPS continuous test
    /// before returning, per spec §4.12.
    pub fn alloc(osr: u32, flags: CollectorFlags) -> Result<Self, JitterError> {
        Self::alloc_with_clock(SystemClock, osr, flags)
    }
}

impl<C: NanoClock> EntropyCollector<C> {
    /// Allocate a collector against an arbitrary [`NanoClock`] — the
    /// generic entry point used by tests and by [`EntropyCollector::alloc`].
    pub fn alloc_with_clock(clock: C, osr: u32, flags: CollectorFlags) -> Result<Self, JitterError> {
        let osr = if osr == 0 { 1 } else { osr };
        let mem = MemoryAccess::new(!flags.disable_memory_access);
        let mut collector = Self {
            mem,
            clock,
            prev_time: 0,
            data: 0,
            old_data: 0,
            fips_failed: false,
            osr,
            flags,
            force_fips: false,
        };

        collector.run_generation_pass();
        if collector.data == 0 {
            warn!("entropy collector allocation produced an all-zero pool");
            return Err(JitterError::AllocFail);
        }
        // Priming never fails (old_data starts at 0), see fips_continuous_test.
        let _ = collector.fips_continuous_test();

        debug!(
            "allocated entropy collector: osr={} flags={:?}",
            collector.osr, collector.flags
        );
        Ok(collector)
    }

    /// Configured oversampling ratio (always `>= 1`).
    pub fn osr(&self) -> u32 {
        self.osr
    }

    /// Allocation-time flags this collector is running with.
    pub fn flags(&self) -> CollectorFlags {
        self.flags
    }

    /// Whether the FIPS continuous test has permanently tripped. Once true
    /// this collector can never succeed again and must be freed.
    pub fn is_fips_failed(&self) -> bool {
        self.fips_failed
    }

    #[cfg(test)]
    pub(crate) fn force_fips_mode_for_test(&mut self, on: bool) {
        self.force_fips = on;
    }

    /// Generator driver (spec §4.8): produce one 64-bit output into `data`.
    fn run_generation_pass(&mut self) {
        let per_round = 64u32.div_ceil(TIME_ENTROPY_BITS);
        let rounds = per_round * self.osr;
        for k in 0..rounds {
            if k == 0 {
                let _ = jitter_measurement(&mut self.mem, &self.clock, &mut self.prev_time, Some(self.data));
            }
            let sample = unbiased_sample(
                &mut self.mem,
                &self.clock,
                &mut self.prev_time,
                Some(self.data),
                self.flags.disable_unbias,
            );
            self.data = accumulate(self.data, sample);
        }
        if !self.flags.disable_stir {
            self.data = stir(self.data);
        }
    }

    /// FIPS 140-2 continuous self-test (spec §4.9). A no-op success when
    /// FIPS mode is not enabled.
    fn fips_continuous_test(&mut self) -> Result<(), JitterError> {
        if !(self.force_fips || fips_mode_enabled()) {
            return Ok(());
        }
        if self.fips_failed {
            return Err(JitterError::FipsContinuousFail);
        }
        if self.old_data == 0 {
            self.old_data = self.data;
            self.run_generation_pass();
            return Ok(());
        }
        if self.data == self.old_data {
            self.fips_failed = true;
            warn!("FIPS 140-2 continuous test detected a stuck output; collector is now dead");
            return Err(JitterError::FipsContinuousFail);
        }
        self.old_data = self.data;
        Ok(())
    }

    /// Fill `buf` with fresh entropy (spec §4.10).
    ///
    /// Generates and FIPS-tests one round at a time, copying `min(8,
    /// remaining)` bytes per round (test-then-copy, per spec §7's
    /// propagation policy). On success scrubs the pool with one more
    /// discarded generation pass unless built with the `secure_memory`
    /// feature (the implementation's memory is then assumed non-pageable
    /// and non-dumpable, making the scrub redundant).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, JitterError> {
        let requested = buf.len();
        let mut written = 0;
        while written < requested {
            self.run_generation_pass();
            self.fips_continuous_test()?;
            let n = (requested - written).min(8);
            let bytes = self.data.to_ne_bytes();
            buf[written..written + n].copy_from_slice(&bytes[..n]);
            written += n;
        }

        #[cfg(not(feature = "secure_memory"))]
        {
            self.run_generation_pass();
        }

        Ok(requested)
    }

    /// Explicit deallocation (spec §4.12). Equivalent to dropping the
    /// collector; named so the lifecycle's four operations (`init`,
    /// `alloc`, `read`, `free`) all have a visible call site.
    pub fn free(self) {}
}

impl<C: NanoClock> Drop for EntropyCollector<C> {
    fn drop(&mut self) {
        self.data.zeroize();
        self.old_data.zeroize();
        self.prev_time.zeroize();
        debug!("freed entropy collector");
    }
}
