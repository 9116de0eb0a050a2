//! # Display Error Types
//!
//! Everything that can stop a display from coming up. Once initialization
//! succeeds nothing in the drawing or scanout paths returns this type.

use thiserror::Error;

/// Errors raised while configuring or initializing a display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// Width or height is zero.
    #[error("display has zero area: {width}x{height}")]
    ZeroArea {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },

    /// A scanline is too long for the 16-bit run count.
    #[error("display width {width} does not fit a 16-bit run count")]
    WidthTooLarge {
        /// Configured width.
        width: u32,
    },

    /// More scanlines than the 16-bit scanline number can address.
    #[error("display height {height} does not fit a 16-bit scanline number")]
    HeightTooLarge {
        /// Configured height.
        height: u32,
    },

    /// A pixel format channel falls outside the 16-bit word, which would make
    /// the leading sentinel black.
    #[error("pixel format shifts r={r_shift} g={g_shift} b={b_shift} exceed bit 11")]
    InvalidPixelFormat {
        /// Red channel position.
        r_shift: u8,
        /// Green channel position.
        g_shift: u8,
        /// Blue channel position.
        b_shift: u8,
    },

    /// Timing descriptor cannot produce a frame period.
    #[error("invalid timing descriptor: {0}")]
    InvalidTiming(String),

    /// Two framebuffers do not fit in the reported free heap.
    #[error("insufficient memory: need {required} bytes, {available} free")]
    InsufficientMemory {
        /// Bytes needed for both buffers.
        required: usize,
        /// Bytes reported free.
        available: usize,
    },

    /// The allocator refused a framebuffer.
    #[error("framebuffer allocation of {bytes} bytes failed")]
    AllocationFailed {
        /// Size of the failed request.
        bytes: usize,
    },

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigParse(String),
}

/// Result type for display initialization.
pub type DisplayResult<T> = Result<T, DisplayError>;
