//! # TWINSCAN
//!
//! Double-buffered framebuffer for a video output engine that pulls one
//! scanline at a time on its own clock.
//!
//! ## Threads
//!
//! ```text
//! application thread                 scanout thread (runs forever)
//! ──────────────────                 ─────────────────────────────
//! begin_draw()  ── paced ──┐         begin_scanline()
//! draw_* into back frame   │         last row? swap if back ready
//! end_draw()  ── ready ────┼───────▶ synthesize row from front frame
//!                          │         end_scanline()
//! ```
//!
//! ## Example
//!
//! ```rust
//! use twinscan::{Display, SimulatedEngine};
//! use twinscan_core::{ManualClock, UnlimitedHeap};
//! use twinscan_shared::{DisplayConfig, Rgb565};
//!
//! let config = DisplayConfig::new(64, 48);
//! let display = Display::init(config.clone(), &UnlimitedHeap, ManualClock::new(0))
//!     .expect("display fits");
//! let (_draw, mut scanout) = display.split();
//!
//! let (mut engine, frames) = SimulatedEngine::new(&config, 2);
//! for _ in 0..2 * usize::from(engine.total_lines()) {
//!     scanout.step(&mut engine);
//! }
//! let _first = frames.recv().expect("first frame");
//! let splash = frames.recv().expect("second frame");
//! assert_eq!(splash.get(0, 0), Some(Rgb565::YELLOW));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod display;
pub mod output;
pub mod splash;

pub use display::Display;
pub use output::{CapturedFrame, OutputEngine, Scanout, ScanoutStats, SimulatedEngine};
pub use splash::paint_splash;
