//! # Scanline Error Types

use thiserror::Error;

/// Errors raised while building or parsing a scanline record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanlineError {
    /// The engine's record cannot hold a full visible scanline.
    #[error("scanline record too small: need {needed} half-words, capacity {capacity}")]
    RecordTooSmall {
        /// Half-words required for the framed row.
        needed: usize,
        /// Half-words the record can hold.
        capacity: usize,
    },

    /// The frame slice does not contain the requested row.
    #[error("row {row} is outside the supplied frame")]
    RowOutOfFrame {
        /// Requested row.
        row: usize,
    },

    /// The width cannot be expressed by the 16-bit run count.
    #[error("scanline width {width} does not fit a 16-bit run count")]
    UnsupportedWidth {
        /// Requested width.
        width: u32,
    },

    /// A record does not follow the raw-run framing.
    #[error("malformed scanline record: {0}")]
    Malformed(&'static str),
}

/// Result type for scanline operations.
pub type ScanlineResult<T> = Result<T, ScanlineError>;
