//! # Raster Primitives
//!
//! Pixel, clipped rectangle and line drawing over a borrowed frame.
//!
//! Every primitive is best-effort: out-of-range or degenerate geometry is
//! clipped or ignored, never reported. The render loop must not stall on a
//! bad coordinate.

mod line;

pub use line::BresenhamLine;

use twinscan_shared::Rgb565;

/// A mutable view of one frame.
pub struct Canvas<'a> {
    pixels: &'a mut [Rgb565],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wraps `pixels` as a `width x height` surface.
    ///
    /// `height` is cut down to the number of whole rows `pixels` holds, so a
    /// short slice yields a shorter surface.
    #[must_use]
    pub fn new(pixels: &'a mut [Rgb565], width: usize, height: usize) -> Self {
        let rows = pixels.len().checked_div(width).unwrap_or(0);
        let height = height.min(rows);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Surface width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Writes one pixel. Ignored outside the surface.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb565) {
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Fills `[x, x + w) x [y, y + h)` clipped to the surface.
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(self.width as i64);
        let y1 = (i64::from(y) + i64::from(h)).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let (x0, x1) = (x0 as usize, x1 as usize);
        for row in y0 as usize..y1 as usize {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(color);
        }
    }

    /// Draws an endpoint-inclusive line.
    ///
    /// Endpoints are clamped into the surface, so lines leaving the frame are
    /// shortened rather than dropped. Axis-aligned lines take a span fill.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        let Some((x0, y0, x1, y1)) = self.clamp_line(x0, y0, x1, y1) else {
            return;
        };

        if y0 == y1 {
            let (from, to) = (x0.min(x1) as usize, x0.max(x1) as usize);
            let start = y0 as usize * self.width;
            self.pixels[start + from..=start + to].fill(color);
        } else if x0 == x1 {
            let (from, to) = (y0.min(y1) as usize, y0.max(y1) as usize);
            let x = x0 as usize;
            for row in from..=to {
                self.pixels[row * self.width + x] = color;
            }
        } else {
            self.plot_bresenham(x0, y0, x1, y1, color);
        }
    }

    /// Same clamping as [`draw_line`](Self::draw_line) but always walks the
    /// general algorithm, even for axis-aligned input.
    pub fn draw_line_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        if let Some((x0, y0, x1, y1)) = self.clamp_line(x0, y0, x1, y1) {
            self.plot_bresenham(x0, y0, x1, y1, color);
        }
    }

    fn plot_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        for (x, y) in BresenhamLine::new(x0, y0, x1, y1) {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    fn clamp_line(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let max_x = i32::try_from(self.width - 1).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.height - 1).unwrap_or(i32::MAX);
        Some((
            x0.clamp(0, max_x),
            y0.clamp(0, max_y),
            x1.clamp(0, max_x),
            y1.clamp(0, max_y),
        ))
    }
}
