//! # Monotonic Clock Sources
//!
//! The pacer only ever asks "how many microseconds since start?".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A microsecond-resolution, never-decreasing time source.
pub trait MonotonicClock {
    /// Microseconds elapsed since the clock's origin.
    fn now_us(&self) -> u64;
}

/// Wall-clock backed source, origin at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Starts a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    #[inline]
    fn now_us(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for simulation and tests.
///
/// Clones share the same counter, so a test can keep one copy and advance
/// time while the pacer owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading `start_us`.
    #[must_use]
    pub fn new(start_us: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_us)),
        }
    }

    /// Moves time forward by `us`.
    pub fn advance(&self, us: u64) {
        self.now.fetch_add(us, Ordering::AcqRel);
    }

    /// Jumps to an absolute reading. Callers must not move backwards.
    pub fn set(&self, us: u64) {
        self.now.store(us, Ordering::Release);
    }
}

impl MonotonicClock for ManualClock {
    #[inline]
    fn now_us(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(100);
        let observer = clock.clone();
        clock.advance(50);
        assert_eq!(observer.now_us(), 150);
        observer.set(1_000);
        assert_eq!(clock.now_us(), 1_000);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_us();
        let b = clock.now_us();
        assert!(b >= a);
    }
}
