//! # Wire Framing
//!
//! A visible scanline goes to the output engine as a single raw run:
//!
//! ```text
//! ┌─────────┬───────┬──────────┬──────────────┬───────────────┬─────┐
//! │ RAW_RUN │ width │ sentinel │ width pixels │ EOL_SKIP_ALIGN│  0  │
//! └─────────┴───────┴──────────┴──────────────┴───────────────┴─────┘
//!    u16       u16      u16       u16 * width        u16          u16
//! ```
//!
//! The engine only accepts a raw run that starts at the left edge of the
//! screen, so each record carries exactly one run covering the whole row.
//! An all-black first value makes the engine drop the whole line, hence the
//! sentinel.

use twinscan_shared::Rgb565;

use crate::error::{ScanlineError, ScanlineResult};

/// Half-words of framing around the pixels: run token, count, sentinel,
/// end-of-line token, pad.
pub const FRAMING_HALFWORDS: usize = 5;

/// Command tokens of the output engine's composable scanline program.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Solid colour run.
    ColorRun = 0,
    /// End of line, then align.
    EolAlign = 1,
    /// End of line, skip straight to the alignment stage.
    EolSkipAlign = 2,
    /// Run of literal pixels.
    RawRun = 3,
    /// One literal pixel.
    Raw1p = 4,
    /// Two literal pixels.
    Raw2p = 5,
    /// One literal pixel, then skip to alignment.
    Raw1pSkipAlign = 6,
}

impl Token {
    /// The on-wire value.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Parses an on-wire value.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => Self::ColorRun,
            1 => Self::EolAlign,
            2 => Self::EolSkipAlign,
            3 => Self::RawRun,
            4 => Self::Raw1p,
            5 => Self::Raw2p,
            6 => Self::Raw1pSkipAlign,
            _ => return None,
        })
    }
}

/// A decoded raw-run record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawRun<'a> {
    /// The leading placeholder value.
    pub sentinel: Rgb565,
    /// The row's pixels, in order.
    pub pixels: &'a [Rgb565],
}

/// Parses the used half-words of a visible scanline record.
///
/// # Errors
///
/// Returns [`ScanlineError::Malformed`] if any framing element is missing or
/// the leading value is black.
pub fn decode_raw_run(halfwords: &[u16]) -> ScanlineResult<RawRun<'_>> {
    if halfwords.len() < FRAMING_HALFWORDS {
        return Err(ScanlineError::Malformed("shorter than the framing"));
    }
    if Token::from_code(halfwords[0]) != Some(Token::RawRun) {
        return Err(ScanlineError::Malformed("missing raw-run token"));
    }
    let count = usize::from(halfwords[1]);
    if halfwords.len() != count + FRAMING_HALFWORDS {
        return Err(ScanlineError::Malformed("run count disagrees with record length"));
    }
    if halfwords[2] == 0 {
        return Err(ScanlineError::Malformed("leading value is black"));
    }
    let end = 3 + count;
    if Token::from_code(halfwords[end]) != Some(Token::EolSkipAlign) {
        return Err(ScanlineError::Malformed("missing end-of-line token"));
    }
    if halfwords[end + 1] != 0 {
        return Err(ScanlineError::Malformed("missing pad"));
    }

    Ok(RawRun {
        sentinel: Rgb565(halfwords[2]),
        pixels: bytemuck::cast_slice(&halfwords[3..end]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_codes() {
        for code in 0..7 {
            assert_eq!(Token::from_code(code).map(Token::code), Some(code));
        }
        assert_eq!(Token::from_code(7), None);
    }

    #[test]
    fn test_decode_valid() {
        let words = [3, 2, 0x0800, 0x0000, 0xFFFF, 2, 0];
        let run = decode_raw_run(&words).unwrap();
        assert_eq!(run.sentinel, Rgb565(0x0800));
        assert_eq!(run.pixels, &[Rgb565::BLACK, Rgb565::WHITE]);
    }

    #[test]
    fn test_decode_rejects_bad_framing() {
        let cases: [(&[u16], &str); 6] = [
            (&[3, 0, 1, 2], "shorter than the framing"),
            (&[0, 1, 1, 5, 2, 0], "missing raw-run token"),
            (&[3, 2, 1, 5, 2, 0], "run count disagrees with record length"),
            (&[3, 1, 0, 5, 2, 0], "leading value is black"),
            (&[3, 1, 1, 5, 1, 0], "missing end-of-line token"),
            (&[3, 1, 1, 5, 2, 9], "missing pad"),
        ];
        for (words, reason) in cases {
            assert_eq!(decode_raw_run(words), Err(ScanlineError::Malformed(reason)));
        }
    }
}
