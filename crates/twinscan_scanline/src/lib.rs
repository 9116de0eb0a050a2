//! # TWINSCAN Scanline
//!
//! Per-scanline conversion from framebuffer rows to the output engine's
//! wire format.
//!
//! ## Pipeline
//!
//! ```text
//! output engine ── lends ──▶ ScanlineRecord (id = frame:line)
//!                               │
//!       front frame row ──▶ ScanlineSynthesizer::synthesize
//!                               │
//! output engine ◀── returns ── [RAW_RUN, w, sentinel, pixels.., EOL, 0]
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod record;
pub mod synth;
pub mod wire;

pub use error::{ScanlineError, ScanlineResult};
pub use record::{ScanlineId, ScanlineRecord, ScanlineStatus};
pub use synth::ScanlineSynthesizer;
pub use wire::{decode_raw_run, RawRun, Token, FRAMING_HALFWORDS};
