//! # Packed Colour
//!
//! Every pixel in a TWINSCAN frame is a single 16-bit word. The drawing side
//! treats it as RGB565; the output engine only ever sees the raw word.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 16-bit packed RGB value (5 bits red, 6 bits green, 5 bits blue).
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Full black. The output engine treats this as "skip" when it leads a scanline.
    pub const BLACK: Self = Self(0x0000);
    /// Full white.
    pub const WHITE: Self = Self(0xFFFF);
    /// Pure red.
    pub const RED: Self = Self(0xF800);
    /// Pure green.
    pub const GREEN: Self = Self(0x07E0);
    /// Pure blue.
    pub const BLUE: Self = Self(0x001F);
    /// Red + green.
    pub const YELLOW: Self = Self(0xFFE0);
    /// Red + blue.
    pub const MAGENTA: Self = Self(0xF81F);
    /// Green + blue.
    pub const CYAN: Self = Self(0x07FF);

    /// Packs 8-bit channels, dropping the low bits of each.
    #[inline]
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// Returns the raw packed word.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for Rgb565 {
    #[inline]
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Rgb565> for u16 {
    #[inline]
    fn from(color: Rgb565) -> Self {
        color.0
    }
}

/// Channel layout of the output engine's 16-bit pixel word.
///
/// Only used to build engine-side constants such as the leading sentinel;
/// framebuffer pixels are passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelFormat {
    /// Bit position of the 5-bit red channel.
    pub r_shift: u8,
    /// Bit position of the 5-bit green channel.
    pub g_shift: u8,
    /// Bit position of the 5-bit blue channel.
    pub b_shift: u8,
}

impl PixelFormat {
    /// The scanvideo default layout: red at bit 0, green at bit 6, blue at bit 11.
    pub const SCANVIDEO: Self = Self {
        r_shift: 0,
        g_shift: 6,
        b_shift: 11,
    };

    /// Classic RGB565 positions with 5-bit green: red at bit 11, green at bit 6
    /// (bit 5, the low green bit, stays clear), blue at bit 0.
    pub const RGB565: Self = Self {
        r_shift: 11,
        g_shift: 6,
        b_shift: 0,
    };

    /// Highest shift that keeps a 5-bit channel inside the 16-bit word.
    pub const MAX_SHIFT: u8 = 11;

    /// Whether every channel lies inside the 16-bit word.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.r_shift <= Self::MAX_SHIFT
            && self.g_shift <= Self::MAX_SHIFT
            && self.b_shift <= Self::MAX_SHIFT
    }

    /// Builds a pixel word from 5-bit channels. Bits beyond 5 are masked off.
    /// A channel whose shift exceeds [`MAX_SHIFT`](Self::MAX_SHIFT) contributes
    /// nothing.
    #[inline]
    #[must_use]
    pub const fn from_rgb5(self, r: u8, g: u8, b: u8) -> Rgb565 {
        Rgb565(channel(r, self.r_shift) | channel(g, self.g_shift) | channel(b, self.b_shift))
    }

    /// The non-black placeholder that leads every visible scanline:
    /// blue forced to its smallest non-zero value.
    #[inline]
    #[must_use]
    pub const fn sentinel(self) -> Rgb565 {
        self.from_rgb5(0, 0, 1)
    }
}

const fn channel(value: u8, shift: u8) -> u16 {
    if shift > PixelFormat::MAX_SHIFT {
        return 0;
    }
    ((value & 0x1F) as u16) << shift
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::SCANVIDEO
    }
}
