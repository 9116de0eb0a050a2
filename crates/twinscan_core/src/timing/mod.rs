//! # Timing
//!
//! Frame pacing for the drawing side.
//!
//! ```text
//! now - last_frame >= period ?
//!     yes -> last_frame = now, start a frame
//!     no  -> skip, try again on the next call
//! ```

mod clock;
mod pacer;

pub use clock::{ManualClock, MonotonicClock, SystemClock};
pub use pacer::{frame_period_us, FramePacer, DEFAULT_FRAME_PERIOD_US};
