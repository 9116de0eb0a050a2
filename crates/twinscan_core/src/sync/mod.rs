//! # Frame Handoff
//!
//! No locks between the drawing side and scanout.
//!
//! ## The Problem
//!
//! ```text
//! Producer (application):  WRITE pixels whenever it likes
//! Consumer (scanout):      READ one row per scanline, forever, on time
//!
//! Shared frame:  TEARING
//! With a Mutex:  a late scanline
//! ```
//!
//! ## The Solution: Double Buffering
//!
//! ```text
//! Frame N:
//!   Producer draws into the back slot, then sets back_ready
//!   Scanout reads the front slot
//!
//! Last visible scanline of frame N:
//!   back_ready ? flip front_index, clear back_ready
//!
//! Frame N+1:
//!   Scanout shows the new frame from scanline 0
//! ```

mod double_buffer;

pub use double_buffer::{DoubleFramebuffer, DrawHandle, ScanoutHandle};
