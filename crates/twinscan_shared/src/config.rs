//! # Display Configuration
//!
//! Geometry and timing of the attached display, loaded once at startup and
//! shared read-only by both execution contexts afterwards.
//!
//! ```toml
//! width = 320
//! height = 240
//!
//! [timing]
//! clock_freq = 25000000
//! h_total = 800
//! v_total = 525
//! ```

use serde::{Deserialize, Serialize};

use crate::color::PixelFormat;
use crate::error::{DisplayError, DisplayResult};

/// Video timing as reported by the mode tables.
///
/// Only the pixel clock and the total (visible + blanking) raster size are
/// needed here; everything else belongs to the output engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingDescriptor {
    /// Pixel clock in Hz.
    pub clock_freq: u32,
    /// Pixels per line, including horizontal blanking.
    pub h_total: u32,
    /// Lines per frame, including vertical blanking.
    pub v_total: u32,
}

impl TimingDescriptor {
    /// Standard 640x480 @ 60 Hz VGA timing.
    #[must_use]
    pub const fn vga_640x480_60() -> Self {
        Self {
            clock_freq: 25_000_000,
            h_total: 800,
            v_total: 525,
        }
    }

    /// Refresh rate in millihertz, or `None` for a degenerate descriptor.
    #[must_use]
    pub fn refresh_millihertz(&self) -> Option<u64> {
        let pixels = u64::from(self.h_total) * u64::from(self.v_total);
        if pixels == 0 {
            return None;
        }
        Some(u64::from(self.clock_freq) * 1000 / pixels)
    }

    fn validate(&self) -> DisplayResult<()> {
        if self.clock_freq == 0 {
            return Err(DisplayError::InvalidTiming("clock_freq must be non-zero".to_string()));
        }
        if self.h_total == 0 || self.v_total == 0 {
            return Err(DisplayError::InvalidTiming(format!(
                "raster totals must be non-zero (h_total={}, v_total={})",
                self.h_total, self.v_total
            )));
        }
        Ok(())
    }
}

/// Display geometry plus optional timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Visible pixels per scanline.
    pub width: u32,
    /// Visible scanlines per frame.
    pub height: u32,
    /// Timing used to derive the frame period. `None` means 60 Hz.
    #[serde(default)]
    pub timing: Option<TimingDescriptor>,
    /// Channel layout of the output engine's pixel word.
    #[serde(default)]
    pub pixel_format: PixelFormat,
}

impl DisplayConfig {
    /// Creates a configuration without timing (60 Hz pacing).
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            timing: None,
            pixel_format: PixelFormat::default(),
        }
    }

    /// Attaches a timing descriptor.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingDescriptor) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Overrides the engine pixel layout.
    #[must_use]
    pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
        self.pixel_format = pixel_format;
        self
    }

    /// Full-resolution 640x480 @ 60 Hz.
    #[must_use]
    pub fn vga_640x480() -> Self {
        Self::new(640, 480).with_timing(TimingDescriptor::vga_640x480_60())
    }

    /// 320x240 on 640x480 @ 60 Hz timing (pixel-doubled by the engine).
    #[must_use]
    pub fn vga_320x240() -> Self {
        Self::new(320, 240).with_timing(TimingDescriptor::vga_640x480_60())
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::ConfigParse`] for malformed TOML, or any
    /// error from [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> DisplayResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| DisplayError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the geometry and timing can drive a display.
    ///
    /// # Errors
    ///
    /// - [`DisplayError::ZeroArea`] if either dimension is zero
    /// - [`DisplayError::WidthTooLarge`] if a scanline cannot be described by the 16-bit run count
    /// - [`DisplayError::HeightTooLarge`] if the last row cannot be named by a 16-bit scanline number
    /// - [`DisplayError::InvalidPixelFormat`] if a channel shift leaves the 16-bit word
    /// - [`DisplayError::InvalidTiming`] for a zero clock or zero raster totals
    pub fn validate(&self) -> DisplayResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DisplayError::ZeroArea {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > u32::from(u16::MAX) {
            return Err(DisplayError::WidthTooLarge { width: self.width });
        }
        if self.height > u32::from(u16::MAX) {
            return Err(DisplayError::HeightTooLarge {
                height: self.height,
            });
        }
        if !self.pixel_format.is_valid() {
            let PixelFormat {
                r_shift,
                g_shift,
                b_shift,
            } = self.pixel_format;
            return Err(DisplayError::InvalidPixelFormat {
                r_shift,
                g_shift,
                b_shift,
            });
        }
        if let Some(timing) = &self.timing {
            timing.validate()?;
        }
        Ok(())
    }

    /// Number of pixels in one frame.
    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of one frame in bytes.
    #[inline]
    #[must_use]
    pub fn framebuffer_bytes(&self) -> usize {
        self.pixel_count() * core::mem::size_of::<u16>()
    }
}
