use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// 100 ns ticks between 0001-01-01T00:00:00Z and the Unix epoch
const TICKS_AT_UNIX_EPOCH: u64 = 621_355_968_000_000_000;

/// Source of the raw nonce candidate
pub trait Clock: Send + Sync {
    /// High-resolution, roughly monotonic tick count
    fn ticks(&self) -> u64;
}

/// Wall clock in 100 ns ticks since 0001-01-01 UTC.
///
/// Keeps nonces in the same range as keys that have already been used
/// against an exchange, which only accepts values above the last one seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn ticks(&self) -> u64 {
        // A clock set before 1970 yields the epoch; the generator still moves forward.
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        TICKS_AT_UNIX_EPOCH + (since_epoch.as_nanos() / 100) as u64
    }
}

/// Strictly increasing nonces, safe to share between concurrent callers.
///
/// Each value is `max(clock.ticks(), last + 1)`, so a coarse clock, a burst of
/// calls within one tick or a clock stepped backwards never produce a repeat.
pub struct NonceGenerator {
    clock: Arc<dyn Clock>,
    last_issued: AtomicU64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_issued: AtomicU64::new(0),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> u64 {
        let candidate = self.clock.ticks();
        // The closure always returns Some, so fetch_update cannot fail.
        let previous = match self.last_issued.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |last| Some(candidate.max(last + 1)),
        ) {
            Ok(previous) | Err(previous) => previous,
        };
        candidate.max(previous + 1)
    }

    /// Last value handed out, 0 before the first call
    pub fn last_issued(&self) -> u64 {
        self.last_issued.load(Ordering::SeqCst)
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NonceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceGenerator")
            .field("last_issued", &self.last_issued())
            .finish_non_exhaustive()
    }
}
