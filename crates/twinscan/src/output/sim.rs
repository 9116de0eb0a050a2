//! Host-side output engine.
//!
//! Stands in for the hardware engine: hands out one record per scanline,
//! decodes what comes back and publishes every completed frame on a bounded
//! channel. When the receiver lags, frames are dropped instead of stalling
//! the scanout thread.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{trace, warn};
use twinscan_scanline::{decode_raw_run, ScanlineId, ScanlineRecord};
use twinscan_shared::{DisplayConfig, Rgb565};

use super::OutputEngine;

/// Frames buffered between the engine and its receiver.
const CAPTURE_DEPTH: usize = 4;

/// One frame as it appeared on the simulated output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Frame counter taken from the scanline ids.
    pub frame: u16,
    /// Width in pixels.
    pub width: usize,
    /// Visible height in pixels.
    pub height: usize,
    /// Row-major pixels.
    pub pixels: Vec<Rgb565>,
    /// Visible lines whose record failed to decode.
    pub malformed_lines: u32,
}

impl CapturedFrame {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/// A software output engine with configurable vertical blanking.
pub struct SimulatedEngine {
    width: usize,
    height: usize,
    total_lines: u16,
    frame: u16,
    line: u16,
    spare: Option<ScanlineRecord>,
    current: Vec<Rgb565>,
    malformed: u32,
    line_period: Option<Duration>,
    frames: Sender<CapturedFrame>,
}

impl SimulatedEngine {
    /// Creates an engine for `config` that adds `blank_lines` of vertical
    /// blanking after each frame. Returns it with the receiving end of the
    /// captured-frame channel.
    #[must_use]
    pub fn new(config: &DisplayConfig, blank_lines: u16) -> (Self, Receiver<CapturedFrame>) {
        let (frames, receiver) = bounded(CAPTURE_DEPTH);
        let width = config.width as usize;
        let height = config.height as usize;
        let total_lines = u16::try_from(config.height)
            .unwrap_or(u16::MAX)
            .saturating_add(blank_lines)
            .max(1);

        let engine = Self {
            width,
            height,
            total_lines,
            frame: 0,
            line: 0,
            spare: None,
            current: vec![Rgb565::BLACK; width * height],
            malformed: 0,
            line_period: None,
            frames,
        };
        (engine, receiver)
    }

    /// Sleeps for `period` before lending each record, approximating line
    /// timing. Without it the engine runs as fast as it is served.
    #[must_use]
    pub fn with_line_period(mut self, period: Duration) -> Self {
        self.line_period = Some(period);
        self
    }

    /// Scanlines per frame, blanking included.
    #[must_use]
    pub fn total_lines(&self) -> u16 {
        self.total_lines
    }

    fn capture_row(&mut self, row: usize, record: &ScanlineRecord) {
        let decoded = decode_raw_run(record.halfwords())
            .ok()
            .filter(|run| run.pixels.len() == self.width);
        match decoded {
            Some(run) => {
                let start = row * self.width;
                self.current[start..start + self.width].copy_from_slice(run.pixels);
            }
            None => self.malformed += 1,
        }
    }

    fn finish_frame(&mut self) {
        let captured = CapturedFrame {
            frame: self.frame,
            width: self.width,
            height: self.height,
            pixels: self.current.clone(),
            malformed_lines: self.malformed,
        };
        match self.frames.try_send(captured) {
            Ok(()) => trace!(frame = self.frame, "frame captured"),
            Err(TrySendError::Full(_)) => trace!(frame = self.frame, "capture dropped"),
            Err(TrySendError::Disconnected(_)) => {}
        }
        if self.malformed > 0 {
            warn!(frame = self.frame, lines = self.malformed, "malformed scanlines");
        }
        self.malformed = 0;
        self.frame = self.frame.wrapping_add(1);
    }
}

impl OutputEngine for SimulatedEngine {
    fn begin_scanline(&mut self) -> ScanlineRecord {
        if let Some(period) = self.line_period {
            thread::sleep(period);
        }
        let mut record = self
            .spare
            .take()
            .unwrap_or_else(|| ScanlineRecord::for_width(self.width));
        record.reset(ScanlineId::new(self.frame, self.line));
        record
    }

    fn end_scanline(&mut self, record: ScanlineRecord) {
        let row = usize::from(self.line);
        if row < self.height {
            self.capture_row(row, &record);
        }
        self.spare = Some(record);

        self.line += 1;
        if self.line >= self.total_lines {
            self.line = 0;
            self.finish_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinscan_scanline::{ScanlineSynthesizer, ScanlineStatus};
    use twinscan_shared::PixelFormat;

    #[test]
    fn test_ids_walk_lines_then_frames() {
        let config = DisplayConfig::new(4, 2);
        let (mut engine, _rx) = SimulatedEngine::new(&config, 1);
        assert_eq!(engine.total_lines(), 3);

        let mut seen = Vec::new();
        for _ in 0..4 {
            let record = engine.begin_scanline();
            seen.push((record.id().frame(), record.id().scanline()));
            engine.end_scanline(record);
        }
        assert_eq!(seen, vec![(0, 0), (0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_captures_decoded_rows() {
        let config = DisplayConfig::new(2, 2);
        let (mut engine, rx) = SimulatedEngine::new(&config, 1);
        let synth = ScanlineSynthesizer::new(2, 2, PixelFormat::SCANVIDEO);
        let frame = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE];

        for _ in 0..3 {
            let mut record = engine.begin_scanline();
            synth
                .synthesize(&frame, record.id().scanline(), &mut record)
                .unwrap();
            engine.end_scanline(record);
        }

        let captured = rx.try_recv().unwrap();
        assert_eq!(captured.frame, 0);
        assert_eq!(captured.pixels, frame.to_vec());
        assert_eq!(captured.get(1, 1), Some(Rgb565::WHITE));
        assert_eq!(captured.get(2, 0), None);
        assert_eq!(captured.malformed_lines, 0);
    }

    #[test]
    fn test_unfilled_record_counts_as_malformed() {
        let config = DisplayConfig::new(2, 1);
        let (mut engine, rx) = SimulatedEngine::new(&config, 0);
        let record = engine.begin_scanline();
        assert_eq!(record.status(), ScanlineStatus::Pending);
        engine.end_scanline(record);

        let captured = rx.try_recv().unwrap();
        assert_eq!(captured.malformed_lines, 1);
        assert_eq!(captured.pixels, vec![Rgb565::BLACK; 2]);
    }

    #[test]
    fn test_full_channel_drops_frames() {
        let config = DisplayConfig::new(1, 1);
        let (mut engine, rx) = SimulatedEngine::new(&config, 0);
        for _ in 0..CAPTURE_DEPTH + 3 {
            let record = engine.begin_scanline();
            engine.end_scanline(record);
        }
        assert_eq!(rx.len(), CAPTURE_DEPTH);
        assert_eq!(rx.try_recv().unwrap().frame, 0);
    }
}
