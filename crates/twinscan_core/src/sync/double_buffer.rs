//! # Double-Buffered Framebuffer
//!
//! Lock-free handoff of finished frames from the drawing side to scanout.
//!
//! ## Safety Note
//!
//! This module requires unsafe code to hand out `&mut` to one slot while the
//! other slot is being read on a different thread. Every unsafe block names
//! the invariant it relies on.

#![allow(unsafe_code)]
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │      DoubleFramebuffer       │
//!                    │                              │
//!                    │  ┌─────────┐   ┌─────────┐   │
//!                    │  │ Slot 0  │   │ Slot 1  │   │
//!                    │  └────┬────┘   └────┬────┘   │
//!                    │       │             │        │
//!                    │  ┌────┴─────────────┴────┐   │
//!                    │  │ front_index (0/1)     │   │
//!                    │  │ back_ready  (bool)    │   │
//!                    │  └───────────────────────┘   │
//!                    └──────────────────────────────┘
//!                                   │ split()
//!                   ┌───────────────┴───────────────┐
//!                   ▼                               ▼
//!           ┌──────────────┐                ┌──────────────┐
//!           │  DrawHandle  │                │ ScanoutHandle│
//!           │  (producer)  │                │  (consumer)  │
//!           └──────────────┘                └──────────────┘
//! ```
//!
//! ## Protocol
//!
//! - `back_ready` has one setter (`DrawHandle::end_draw`, Release) and one
//!   clearer (`ScanoutHandle::swap_if_ready`, Release).
//! - `front_index` has one writer: the scanout side, and only while
//!   `back_ready` is true.
//! - The drawing side only touches the back slot between a successful
//!   `begin_draw` (which observed `back_ready == false`) and `end_draw`.
//!   During that window the scanout side cannot swap, so the two sides never
//!   touch the same slot.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};
use twinscan_shared::{DisplayResult, Rgb565};

use crate::memory::PixelBuffer;
use crate::raster::Canvas;
use crate::timing::{FramePacer, MonotonicClock};

struct Shared {
    slots: [UnsafeCell<PixelBuffer>; 2],
    front_index: AtomicUsize,
    back_ready: AtomicBool,
    swap_count: AtomicU64,
    width: usize,
    height: usize,
}

// SAFETY: slot access is partitioned by the protocol above; the handles are
// the only way in and there is exactly one of each.
unsafe impl Sync for Shared {}

/// Two equally sized frames plus the flag that hands one over.
///
/// Construct once at startup, then [`split`](Self::split) into the producer
/// and consumer halves.
pub struct DoubleFramebuffer {
    shared: Shared,
}

impl DoubleFramebuffer {
    /// Allocates both frames (black). If the second allocation fails the
    /// first is released before returning.
    ///
    /// # Errors
    ///
    /// Returns [`twinscan_shared::DisplayError::AllocationFailed`] if either
    /// frame cannot be allocated.
    pub fn allocate(width: usize, height: usize) -> DisplayResult<Self> {
        let front = PixelBuffer::try_new(width, height)?;
        let back = PixelBuffer::try_new(width, height)?;
        Ok(Self {
            shared: Shared {
                slots: [UnsafeCell::new(front), UnsafeCell::new(back)],
                front_index: AtomicUsize::new(0),
                back_ready: AtomicBool::new(false),
                swap_count: AtomicU64::new(0),
                width,
                height,
            },
        })
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.shared.width
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.shared.height
    }

    /// Hands out the only producer and the only consumer.
    #[must_use]
    pub fn split<C: MonotonicClock>(self, pacer: FramePacer<C>) -> (DrawHandle<C>, ScanoutHandle) {
        let shared = Arc::new(self.shared);
        let draw = DrawHandle {
            shared: Arc::clone(&shared),
            pacer,
            back_index: None,
            frames_published: 0,
        };
        let scanout = ScanoutHandle {
            shared,
            front_index: 0,
        };
        (draw, scanout)
    }
}

/// Producer half: paces frames, draws into the back slot, publishes it.
pub struct DrawHandle<C> {
    shared: Arc<Shared>,
    pacer: FramePacer<C>,
    /// `Some` only inside an open draw cycle.
    back_index: Option<usize>,
    frames_published: u64,
}

impl<C: MonotonicClock> DrawHandle<C> {
    /// Asks the pacer whether a new frame may start. Consumes the permission
    /// when it returns `true`.
    pub fn can_start_frame(&mut self) -> bool {
        self.pacer.can_start_frame()
    }

    /// Opens a draw cycle if the pacer allows a new frame and the previously
    /// published frame has already been picked up by scanout.
    ///
    /// The pacer is consulted first, so a granted period is spent even when
    /// the back slot is still busy.
    pub fn begin_draw(&mut self) -> bool {
        self.can_start_frame() && self.open_back_slot()
    }

    /// Opens a draw cycle without consulting the pacer. Still refuses while a
    /// published frame is waiting for scanout.
    pub fn begin_draw_unpaced(&mut self) -> bool {
        self.open_back_slot()
    }

    fn open_back_slot(&mut self) -> bool {
        if self.shared.back_ready.load(Ordering::Acquire) {
            return false;
        }
        let front = self.shared.front_index.load(Ordering::Acquire);
        self.back_index = Some(front ^ 1);
        true
    }

    /// Publishes the back slot as a complete frame.
    ///
    /// Always sets the ready flag. Without a matching `begin_draw` the
    /// published frame holds whatever the slot last contained.
    pub fn end_draw(&mut self) {
        if self.back_index.take().is_none() {
            warn!("end_draw without an open draw cycle; publishing stale back buffer");
        }
        self.shared.back_ready.store(true, Ordering::Release);
        self.frames_published += 1;
    }

    /// Whether a draw cycle is open.
    #[inline]
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.back_index.is_some()
    }

    /// Whether a published frame is still waiting to be swapped in.
    #[inline]
    #[must_use]
    pub fn is_back_ready(&self) -> bool {
        self.shared.back_ready.load(Ordering::Acquire)
    }

    /// Number of `end_draw` calls so far.
    #[inline]
    #[must_use]
    pub fn frames_published(&self) -> u64 {
        self.frames_published
    }

    /// Restarts frame pacing from the current time.
    pub fn restart_pacing(&mut self) {
        self.pacer.restart();
    }

    /// The frame pacer.
    #[must_use]
    pub fn pacer(&self) -> &FramePacer<C> {
        &self.pacer
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.shared.width
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.shared.height
    }

    /// Drawing surface over the back slot, or `None` outside a draw cycle.
    pub fn canvas(&mut self) -> Option<Canvas<'_>> {
        let index = self.back_index?;
        // SAFETY: `back_index` is only set after observing `back_ready ==
        // false`, and only this handle can set it back to true. Until then
        // scanout cannot swap, so slot `index` is not the front slot and no
        // one else references it. The `&mut self` borrow keeps this canvas
        // from outliving the cycle.
        let buffer = unsafe { &mut *self.shared.slots[index].get() };
        Some(buffer.canvas())
    }

    /// The back slot's pixels, or `None` outside a draw cycle.
    #[must_use]
    pub fn back_pixels(&self) -> Option<&[Rgb565]> {
        let index = self.back_index?;
        // SAFETY: same slot ownership argument as `canvas`; shared borrow of
        // `self` excludes a concurrent canvas.
        let buffer = unsafe { &*self.shared.slots[index].get() };
        Some(buffer.pixels())
    }

    /// Sets one back-buffer pixel. No-op outside a draw cycle.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb565) {
        if let Some(mut canvas) = self.canvas() {
            canvas.set_pixel(x, y, color);
        }
    }

    /// Fills a clipped rectangle in the back buffer. No-op outside a draw cycle.
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if let Some(mut canvas) = self.canvas() {
            canvas.draw_rectangle(x, y, w, h, color);
        }
    }

    /// Draws a clamped line in the back buffer. No-op outside a draw cycle.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        if let Some(mut canvas) = self.canvas() {
            canvas.draw_line(x0, y0, x1, y1, color);
        }
    }
}

/// Consumer half: reads the front slot and performs the swap.
pub struct ScanoutHandle {
    shared: Arc<Shared>,
    /// Mirror of `shared.front_index`; this handle is its only writer.
    front_index: usize,
}

impl ScanoutHandle {
    /// Exchanges front and back if a finished frame is waiting.
    ///
    /// Returns whether a swap happened. Buffer contents are never copied.
    pub fn swap_if_ready(&mut self) -> bool {
        if !self.shared.back_ready.load(Ordering::Acquire) {
            return false;
        }
        let new_front = self.front_index ^ 1;
        self.shared.front_index.store(new_front, Ordering::Release);
        self.front_index = new_front;
        self.shared.back_ready.store(false, Ordering::Release);
        let swaps = self.shared.swap_count.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(front = new_front, swaps, "framebuffer swap");
        true
    }

    /// Swaps only when `row` is the last visible scanline.
    pub fn swap_at_row(&mut self, row: u32) -> bool {
        row as usize + 1 == self.shared.height && self.swap_if_ready()
    }

    /// The frame currently being scanned out.
    #[must_use]
    pub fn front(&self) -> &PixelBuffer {
        // SAFETY: the drawing side only writes the slot it selected as
        // `front_index ^ 1`, and `front_index` only changes through
        // `swap_if_ready(&mut self)`, which cannot run while this borrow lives.
        unsafe { &*self.shared.slots[self.front_index].get() }
    }

    /// One row of the front frame, or `None` past the bottom edge.
    #[must_use]
    pub fn front_row(&self, row: usize) -> Option<&[Rgb565]> {
        self.front().row(row)
    }

    /// Index (0 or 1) of the front slot.
    #[inline]
    #[must_use]
    pub fn front_index(&self) -> usize {
        self.front_index
    }

    /// Whether a finished frame is waiting.
    #[inline]
    #[must_use]
    pub fn is_back_ready(&self) -> bool {
        self.shared.back_ready.load(Ordering::Acquire)
    }

    /// Number of swaps performed so far.
    #[inline]
    #[must_use]
    pub fn swap_count(&self) -> u64 {
        self.shared.swap_count.load(Ordering::Relaxed)
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.shared.width
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.shared.height
    }
}
