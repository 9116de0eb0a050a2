//! # Output Path
//!
//! The output engine drives timing; this side only answers its requests.
//!
//! ```text
//! ┌───────────────┐ begin_scanline ┌──────────┐ front row ┌──────────────┐
//! │ OutputEngine  │───────────────▶│ Scanout  │◀──────────│ ScanoutHandle│
//! │ (pixel clock) │◀───────────────│  serve() │  swap at  │ (front slot) │
//! └───────────────┘  end_scanline  └──────────┘  last row └──────────────┘
//! ```

mod scanout;
mod sim;

pub use scanout::{Scanout, ScanoutStats};
pub use sim::{CapturedFrame, SimulatedEngine};

use twinscan_scanline::ScanlineRecord;

/// The timing-driven consumer of scanline records.
///
/// Implementations own the record storage and the signal timing. The scanout
/// loop calls `begin_scanline` and `end_scanline` alternately, forever.
pub trait OutputEngine {
    /// Blocks until the next scanline is due and lends its record. The
    /// record's id names the scanline being requested.
    fn begin_scanline(&mut self) -> ScanlineRecord;

    /// Takes back a filled record for output.
    fn end_scanline(&mut self, record: ScanlineRecord);
}
