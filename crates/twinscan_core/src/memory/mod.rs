//! # Memory Management
//!
//! Framebuffers are allocated once at startup. After that:
//! - No heap allocations
//! - No resizing
//! - Buffers live as long as the display

mod framebuffer;
mod heap;

pub use framebuffer::PixelBuffer;
pub use heap::{ensure_double_buffer_fits, framebuffer_bytes, FixedHeap, HeapReporter, UnlimitedHeap};
