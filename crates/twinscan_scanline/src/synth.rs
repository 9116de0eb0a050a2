//! # Scanline Synthesizer
//!
//! Converts one framebuffer row into the engine's raw-run record. Called
//! once per scanline from the scanout loop, so it must not allocate.

use twinscan_shared::{DisplayConfig, PixelFormat, Rgb565};

use crate::error::{ScanlineError, ScanlineResult};
use crate::record::ScanlineRecord;
use crate::wire::{Token, FRAMING_HALFWORDS};

/// Builds scanline records for a fixed display geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanlineSynthesizer {
    width: u16,
    height: u32,
    sentinel: Rgb565,
}

impl ScanlineSynthesizer {
    /// Creates a synthesizer for `width x height` using `format`'s sentinel.
    #[must_use]
    pub const fn new(width: u16, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            sentinel: format.sentinel(),
        }
    }

    /// Creates a synthesizer matching a display configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScanlineError::UnsupportedWidth`] if the width exceeds the
    /// 16-bit run count.
    pub fn from_config(config: &DisplayConfig) -> ScanlineResult<Self> {
        let width = u16::try_from(config.width)
            .map_err(|_| ScanlineError::UnsupportedWidth { width: config.width })?;
        Ok(Self::new(width, config.height, config.pixel_format))
    }

    /// Half-words in every visible record.
    #[inline]
    #[must_use]
    pub const fn record_halfwords(&self) -> usize {
        self.width as usize + FRAMING_HALFWORDS
    }

    /// The leading placeholder value.
    #[inline]
    #[must_use]
    pub const fn sentinel(&self) -> Rgb565 {
        self.sentinel
    }

    /// Fills `record` for scanline `row` of `frame`.
    ///
    /// Rows at or past the visible height produce an empty record. Returns
    /// the number of half-words written.
    ///
    /// # Errors
    ///
    /// - [`ScanlineError::RowOutOfFrame`] if `frame` is too short for `row`
    /// - [`ScanlineError::RecordTooSmall`] if `record` cannot hold the row;
    ///   the record is then marked as failed and left empty
    pub fn synthesize(
        &self,
        frame: &[Rgb565],
        row: u32,
        record: &mut ScanlineRecord,
    ) -> ScanlineResult<usize> {
        if row >= self.height {
            record.set_empty();
            return Ok(0);
        }

        let width = usize::from(self.width);
        let start = row as usize * width;
        let Some(pixels) = frame.get(start..start + width) else {
            record.set_error();
            return Err(ScanlineError::RowOutOfFrame { row: row as usize });
        };

        let needed = self.record_halfwords();
        let capacity = record.capacity_halfwords();
        if capacity < needed {
            record.set_error();
            return Err(ScanlineError::RecordTooSmall { needed, capacity });
        }

        let out = record.payload_mut();
        out[0] = Token::RawRun.code();
        out[1] = self.width;
        out[2] = self.sentinel.raw();
        out[3..3 + width].copy_from_slice(bytemuck::cast_slice(pixels));
        out[3 + width] = Token::EolSkipAlign.code();
        out[4 + width] = 0;

        record.commit(needed);
        Ok(needed)
    }
}
