//! # TWINSCAN Core Engine
//!
//! Double-buffered framebuffer for a display that pulls scanlines on its own
//! clock while the application draws at its own pace.
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations after init** - both frames are allocated once
//! 2. **No locks** - one atomic flag and one atomic index cross threads
//! 3. **Drawing never fails loudly** - bad geometry is clipped or ignored
//!
//! ## Example
//!
//! ```rust
//! use twinscan_core::{DoubleFramebuffer, FramePacer, ManualClock, DEFAULT_FRAME_PERIOD_US};
//! use twinscan_shared::Rgb565;
//!
//! let clock = ManualClock::new(0);
//! let pacer = FramePacer::new(clock.clone(), None);
//! let (mut draw, mut scanout) = DoubleFramebuffer::allocate(320, 240)
//!     .expect("two frames fit")
//!     .split(pacer);
//!
//! clock.advance(DEFAULT_FRAME_PERIOD_US);
//! if draw.begin_draw() {
//!     draw.draw_rectangle(10, 10, 50, 20, Rgb565::RED);
//!     draw.end_draw();
//! }
//! assert!(scanout.swap_at_row(239));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;
pub mod raster;
pub mod sync;
pub mod timing;

pub use memory::{
    ensure_double_buffer_fits, framebuffer_bytes, FixedHeap, HeapReporter, PixelBuffer,
    UnlimitedHeap,
};
pub use raster::{BresenhamLine, Canvas};
pub use sync::{DoubleFramebuffer, DrawHandle, ScanoutHandle};
pub use timing::{
    frame_period_us, FramePacer, ManualClock, MonotonicClock, SystemClock,
    DEFAULT_FRAME_PERIOD_US,
};
