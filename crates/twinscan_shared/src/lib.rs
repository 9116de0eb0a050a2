//! # TWINSCAN Shared
//!
//! Common types used by the drawing side and the scanout side.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER own a pixel buffer or a thread.
//! If you need either, put it in `twinscan_core`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod error;

pub use color::{PixelFormat, Rgb565};
pub use config::{DisplayConfig, TimingDescriptor};
pub use error::{DisplayError, DisplayResult};
