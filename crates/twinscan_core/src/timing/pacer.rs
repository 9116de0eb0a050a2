//! # Frame Pacer
//!
//! Keeps the drawing side from starting frames faster than the display
//! can show them. Pure clock comparison: it never sleeps.

use twinscan_shared::TimingDescriptor;

use super::clock::MonotonicClock;

/// Frame period used when no timing descriptor is configured (60 Hz).
pub const DEFAULT_FRAME_PERIOD_US: u64 = 16_666;

/// Nominal frame period in microseconds, rounded to nearest.
///
/// `period = round(1e6 * h_total * v_total / clock_freq)`. Degenerate
/// descriptors fall back to [`DEFAULT_FRAME_PERIOD_US`].
#[must_use]
pub fn frame_period_us(timing: Option<&TimingDescriptor>) -> u64 {
    let Some(timing) = timing else {
        return DEFAULT_FRAME_PERIOD_US;
    };
    let clock = u128::from(timing.clock_freq);
    let pixels = u128::from(timing.h_total) * u128::from(timing.v_total);
    if clock == 0 || pixels == 0 {
        return DEFAULT_FRAME_PERIOD_US;
    }
    // Wide enough for any pair of u32 totals; only the quotient can exceed u64.
    let period = (1_000_000 * pixels + clock / 2) / clock;
    u64::try_from(period).unwrap_or(u64::MAX)
}

/// Grants at most one frame start per frame period.
#[derive(Debug)]
pub struct FramePacer<C> {
    clock: C,
    period_us: u64,
    last_frame_us: u64,
}

impl<C: MonotonicClock> FramePacer<C> {
    /// Creates a pacer whose last frame started at time zero.
    #[must_use]
    pub fn new(clock: C, timing: Option<&TimingDescriptor>) -> Self {
        Self {
            clock,
            period_us: frame_period_us(timing),
            last_frame_us: 0,
        }
    }

    /// Returns `true` and consumes the permission if a full period has
    /// elapsed since the last granted frame; otherwise `false` with no
    /// side effect.
    pub fn can_start_frame(&mut self) -> bool {
        let now = self.clock.now_us();
        if now.saturating_sub(self.last_frame_us) >= self.period_us {
            self.last_frame_us = now;
            true
        } else {
            false
        }
    }

    /// Treats "now" as the start of the most recent frame.
    pub fn restart(&mut self) {
        self.last_frame_us = self.clock.now_us();
    }

    /// The computed frame period.
    #[inline]
    #[must_use]
    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    /// Timestamp of the last granted frame start.
    #[inline]
    #[must_use]
    pub fn last_frame_us(&self) -> u64 {
        self.last_frame_us
    }
}
