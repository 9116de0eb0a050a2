//! # Scanline Records
//!
//! The output engine owns a pool of records and lends one out per scanline.
//! Storage is 32-bit words (what the engine's DMA reads); the payload is
//! written as 16-bit units in native order, two per word.

use crate::wire::FRAMING_HALFWORDS;

/// Frame number (upper 16 bits) and scanline number (lower 16 bits), as
/// reported by the output engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScanlineId(pub u32);

impl ScanlineId {
    /// Packs a frame and scanline number.
    #[inline]
    #[must_use]
    pub const fn new(frame: u16, scanline: u16) -> Self {
        Self(((frame as u32) << 16) | scanline as u32)
    }

    /// Scanline number within the frame.
    #[inline]
    #[must_use]
    pub const fn scanline(self) -> u32 {
        self.0 & 0xFFFF
    }

    /// Frame number, wrapping at 16 bits.
    #[inline]
    #[must_use]
    pub const fn frame(self) -> u32 {
        self.0 >> 16
    }
}

/// Outcome recorded on a scanline record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanlineStatus {
    /// Handed out, not yet filled.
    #[default]
    Pending,
    /// Filled (possibly with zero length) and ready for output.
    Ok,
    /// Could not be filled; the engine should treat it as blank.
    Error,
}

/// One scanline's worth of engine-owned storage.
#[derive(Clone, Debug)]
pub struct ScanlineRecord {
    id: ScanlineId,
    data: Box<[u32]>,
    used: usize,
    status: ScanlineStatus,
}

impl ScanlineRecord {
    /// Allocates a record holding `words` 32-bit words.
    #[must_use]
    pub fn with_capacity_words(words: usize) -> Self {
        Self {
            id: ScanlineId::default(),
            data: vec![0u32; words].into_boxed_slice(),
            used: 0,
            status: ScanlineStatus::Pending,
        }
    }

    /// Allocates a record just large enough for a `width`-pixel scanline.
    #[must_use]
    pub fn for_width(width: usize) -> Self {
        Self::with_capacity_words((width + FRAMING_HALFWORDS).div_ceil(2))
    }

    /// Prepares the record for reuse under a new id.
    pub fn reset(&mut self, id: ScanlineId) {
        self.id = id;
        self.used = 0;
        self.status = ScanlineStatus::Pending;
    }

    /// The scanline this record is for.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ScanlineId {
        self.id
    }

    /// Fill status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> ScanlineStatus {
        self.status
    }

    /// Capacity in 16-bit payload units.
    #[inline]
    #[must_use]
    pub fn capacity_halfwords(&self) -> usize {
        self.data.len() * 2
    }

    /// Encoded length in 16-bit payload units.
    #[inline]
    #[must_use]
    pub fn used_halfwords(&self) -> usize {
        self.used
    }

    /// Encoded length in 32-bit words, rounded up.
    #[inline]
    #[must_use]
    pub fn data_used(&self) -> usize {
        self.used.div_ceil(2)
    }

    /// The encoded payload as 16-bit units.
    #[must_use]
    pub fn halfwords(&self) -> &[u16] {
        &bytemuck::cast_slice::<u32, u16>(&self.data)[..self.used]
    }

    /// The encoded payload as the words the engine transmits.
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.data[..self.data_used()]
    }

    pub(crate) fn payload_mut(&mut self) -> &mut [u16] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Marks `halfwords` units as written. An odd length zero-fills the
    /// other half of the last word.
    pub(crate) fn commit(&mut self, halfwords: usize) {
        if halfwords % 2 == 1 {
            self.payload_mut()[halfwords] = 0;
        }
        self.used = halfwords;
        self.status = ScanlineStatus::Ok;
    }

    /// Marks the record as an intentionally empty (blanking) scanline.
    pub fn set_empty(&mut self) {
        self.used = 0;
        self.status = ScanlineStatus::Ok;
    }

    pub(crate) fn set_error(&mut self) {
        self.used = 0;
        self.status = ScanlineStatus::Error;
    }
}
