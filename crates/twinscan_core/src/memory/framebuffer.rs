//! # Pixel Buffer
//!
//! One frame worth of packed pixels, allocated once and never resized.

use twinscan_shared::{DisplayError, DisplayResult, Rgb565};

use super::heap::framebuffer_bytes;
use crate::raster::Canvas;

/// A contiguous `width * height` frame, row-major.
pub struct PixelBuffer {
    pixels: Box<[Rgb565]>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Allocates a black frame, reporting allocator refusal instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::AllocationFailed`] if the size overflows or the
    /// allocator cannot satisfy the request.
    pub fn try_new(width: usize, height: usize) -> DisplayResult<Self> {
        let bytes = framebuffer_bytes(width, height);
        let len = width
            .checked_mul(height)
            .ok_or(DisplayError::AllocationFailed { bytes })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| DisplayError::AllocationFailed { bytes })?;
        pixels.resize(len, Rgb565::BLACK);

        Ok(Self {
            pixels: pixels.into_boxed_slice(),
            width,
            height,
        })
    }

    /// Pixels per row.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The whole frame.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// The whole frame, mutably.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgb565] {
        &mut self.pixels
    }

    /// Row `y`, or `None` past the bottom edge.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Rgb565]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.pixels.get(start..start + self.width)
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb565> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| row[x])
    }

    /// Drawing surface over this frame.
    #[inline]
    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.pixels, self.width, self.height)
    }
}
