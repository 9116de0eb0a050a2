//! # Heap Reporting
//!
//! Constrained targets check the free heap before committing two full
//! frames of memory. Hosts with plenty of memory use [`UnlimitedHeap`].

use twinscan_shared::{DisplayError, DisplayResult};

/// Reports total and free heap, in bytes.
pub trait HeapReporter {
    /// Size of the heap region.
    fn total_heap(&self) -> usize;
    /// Bytes currently available for allocation.
    fn free_heap(&self) -> usize;
}

/// A fixed heap budget, e.g. measured from linker symbols at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedHeap {
    /// Size of the heap region.
    pub total: usize,
    /// Bytes already in use.
    pub used: usize,
}

impl FixedHeap {
    /// Creates a budget of `total` bytes with `used` already taken.
    #[must_use]
    pub const fn new(total: usize, used: usize) -> Self {
        Self { total, used }
    }
}

impl HeapReporter for FixedHeap {
    fn total_heap(&self) -> usize {
        self.total
    }

    fn free_heap(&self) -> usize {
        self.total.saturating_sub(self.used)
    }
}

/// Reports an unbounded heap. Allocation failures still surface from the
/// allocator itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnlimitedHeap;

impl HeapReporter for UnlimitedHeap {
    fn total_heap(&self) -> usize {
        usize::MAX
    }

    fn free_heap(&self) -> usize {
        usize::MAX
    }
}

/// Bytes needed for one `width x height` frame of 16-bit pixels.
#[inline]
#[must_use]
pub fn framebuffer_bytes(width: usize, height: usize) -> usize {
    width.saturating_mul(height).saturating_mul(core::mem::size_of::<u16>())
}

/// Fails unless two frames of `frame_bytes` fit in the reported free heap.
///
/// # Errors
///
/// Returns [`DisplayError::InsufficientMemory`] when they do not.
pub fn ensure_double_buffer_fits(
    heap: &dyn HeapReporter,
    frame_bytes: usize,
) -> DisplayResult<()> {
    let required = frame_bytes.saturating_mul(2);
    let available = heap.free_heap();
    if required > available {
        return Err(DisplayError::InsufficientMemory {
            required,
            available,
        });
    }
    Ok(())
}
