//! # Display Bring-Up
//!
//! `Display::init` is the only way to obtain the drawing and scanout halves,
//! so nothing can draw or scan out before both frames exist.
//!
//! ## Init sequence
//!
//! 1. Validate the configuration
//! 2. Check the heap can hold two frames
//! 3. Allocate both frames
//! 4. Paint the splash into the back frame and publish it
//! 5. Restart frame pacing so the first paced frame waits a full period

use std::sync::Arc;

use tracing::{info, warn};
use twinscan_core::{
    ensure_double_buffer_fits, DoubleFramebuffer, DrawHandle, FramePacer, HeapReporter,
    MonotonicClock,
};
use twinscan_scanline::ScanlineSynthesizer;
use twinscan_shared::{DisplayConfig, DisplayError, DisplayResult};

use crate::output::Scanout;
use crate::splash::paint_splash;

/// An initialized display: both frames allocated, splash published.
pub struct Display<C> {
    config: Arc<DisplayConfig>,
    draw: DrawHandle<C>,
    scanout: Scanout,
}

impl<C: MonotonicClock> Display<C> {
    /// Brings up the display described by `config`.
    ///
    /// On success the splash is waiting in the back frame and will be shown
    /// from the first swap on.
    ///
    /// # Errors
    ///
    /// - [`DisplayError::ZeroArea`] / [`DisplayError::WidthTooLarge`] /
    ///   [`DisplayError::HeightTooLarge`] / [`DisplayError::InvalidPixelFormat`] /
    ///   [`DisplayError::InvalidTiming`] for a bad configuration
    /// - [`DisplayError::InsufficientMemory`] if `heap` cannot hold two frames
    /// - [`DisplayError::AllocationFailed`] if the allocator refuses
    pub fn init(
        config: impl Into<Arc<DisplayConfig>>,
        heap: &dyn HeapReporter,
        clock: C,
    ) -> DisplayResult<Self> {
        let config = config.into();
        if let Err(e) = config.validate() {
            warn!(error = %e, "display configuration rejected");
            return Err(e);
        }

        let frame_bytes = config.framebuffer_bytes();
        if let Err(e) = ensure_double_buffer_fits(heap, frame_bytes) {
            warn!(error = %e, "not enough heap for two frames");
            return Err(e);
        }

        let synth = ScanlineSynthesizer::from_config(&config).map_err(|_| {
            DisplayError::WidthTooLarge {
                width: config.width,
            }
        })?;
        let frames = DoubleFramebuffer::allocate(config.width as usize, config.height as usize)?;
        let pacer = FramePacer::new(clock, config.timing.as_ref());
        let period_us = pacer.period_us();
        let (mut draw, handle) = frames.split(pacer);

        if draw.begin_draw_unpaced() {
            if let Some(mut canvas) = draw.canvas() {
                paint_splash(&mut canvas);
            }
            draw.end_draw();
        }
        draw.restart_pacing();

        info!(
            width = config.width,
            height = config.height,
            frame_bytes,
            period_us,
            "display initialized"
        );

        Ok(Self {
            config,
            draw,
            scanout: Scanout::new(handle, synth),
        })
    }

    /// The configuration the display was brought up with.
    #[must_use]
    pub fn config(&self) -> &Arc<DisplayConfig> {
        &self.config
    }

    /// The drawing half.
    pub fn draw_handle(&mut self) -> &mut DrawHandle<C> {
        &mut self.draw
    }

    /// The scanout half.
    pub fn scanout(&mut self) -> &mut Scanout {
        &mut self.scanout
    }

    /// Separates the halves so each can move to its own thread.
    #[must_use]
    pub fn split(self) -> (DrawHandle<C>, Scanout) {
        (self.draw, self.scanout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinscan_core::{FixedHeap, ManualClock, UnlimitedHeap};
    use twinscan_scanline::{ScanlineId, ScanlineRecord};
    use twinscan_shared::Rgb565;

    fn serve_row(scanout: &mut Scanout, width: usize, row: u16) {
        let mut record = ScanlineRecord::for_width(width);
        record.reset(ScanlineId::new(0, row));
        scanout.serve(&mut record);
    }

    #[test]
    fn test_init_publishes_splash() {
        let mut display =
            Display::init(DisplayConfig::vga_320x240(), &UnlimitedHeap, ManualClock::new(0))
                .unwrap();
        let draw = display.draw_handle();
        assert!(draw.is_back_ready());
        assert!(!draw.is_drawing());
        assert_eq!(draw.frames_published(), 1);

        let (_draw, mut scanout) = display.split();
        assert!(scanout.handle().front().pixels().iter().all(|p| *p == Rgb565::BLACK));

        serve_row(&mut scanout, 320, 239);
        assert_eq!(scanout.stats().swaps, 1);
        assert_eq!(scanout.handle().front().get(0, 0), Some(Rgb565::YELLOW));
        assert_eq!(scanout.handle().front().get(0, 40), Some(Rgb565::BLUE));
    }

    #[test]
    fn test_init_rejects_zero_area() {
        let result =
            Display::init(DisplayConfig::new(0, 240), &UnlimitedHeap, ManualClock::new(0));
        assert!(matches!(result, Err(DisplayError::ZeroArea { .. })));
    }

    #[test]
    fn test_init_rejects_small_heap() {
        let config = DisplayConfig::vga_320x240();
        let one_frame = config.framebuffer_bytes();
        let heap = FixedHeap::new(one_frame * 2 - 1, 0);
        let result = Display::init(config, &heap, ManualClock::new(0));
        assert!(matches!(
            result,
            Err(DisplayError::InsufficientMemory { required, .. }) if required == one_frame * 2
        ));
    }

    #[test]
    fn test_init_uses_timing_period() {
        let mut display =
            Display::init(DisplayConfig::vga_640x480(), &UnlimitedHeap, ManualClock::new(0))
                .unwrap();
        assert_eq!(display.draw_handle().pacer().period_us(), 16_800);
    }

    #[test]
    fn test_first_paced_frame_waits_full_period() {
        let clock = ManualClock::new(1_000);
        let display =
            Display::init(DisplayConfig::new(16, 16), &UnlimitedHeap, clock.clone()).unwrap();
        let (mut draw, mut scanout) = display.split();

        // Splash swapped in, so only pacing can hold the producer back.
        serve_row(&mut scanout, 16, 15);

        clock.advance(16_665);
        assert!(!draw.begin_draw());
        clock.advance(1);
        assert!(draw.begin_draw());
    }
}
