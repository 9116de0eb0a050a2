//! Scanout loop: one swap check and one synthesized record per scanline.

use std::thread::{self, JoinHandle};

use tracing::{error, info};
use twinscan_core::ScanoutHandle;
use twinscan_scanline::{ScanlineRecord, ScanlineSynthesizer};

use super::OutputEngine;

/// Counters kept by the scanout loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanoutStats {
    /// Records served.
    pub scanlines: u64,
    /// Records carrying a visible row.
    pub visible: u64,
    /// Records left empty for blanking lines.
    pub blank: u64,
    /// Front/back swaps performed.
    pub swaps: u64,
    /// Records that could not be filled.
    pub failures: u64,
}

/// Consumer context: owns the front buffer side of the handoff.
pub struct Scanout {
    handle: ScanoutHandle,
    synth: ScanlineSynthesizer,
    stats: ScanoutStats,
}

impl Scanout {
    /// Pairs the consumer handle with a synthesizer for the same geometry.
    #[must_use]
    pub fn new(handle: ScanoutHandle, synth: ScanlineSynthesizer) -> Self {
        Self {
            handle,
            synth,
            stats: ScanoutStats::default(),
        }
    }

    /// Fills `record` for the scanline named by its id.
    ///
    /// On the last visible row a waiting frame is swapped in first, so that
    /// row and everything after it comes from the new frame.
    pub fn serve(&mut self, record: &mut ScanlineRecord) {
        let row = record.id().scanline();
        if self.handle.swap_at_row(row) {
            self.stats.swaps += 1;
        }

        match self.synth.synthesize(self.handle.front().pixels(), row, record) {
            Ok(0) => self.stats.blank += 1,
            Ok(_) => self.stats.visible += 1,
            Err(e) => {
                self.stats.failures += 1;
                error!(error = %e, row, "scanline emitted empty");
            }
        }
        self.stats.scanlines += 1;
    }

    /// Services exactly one scanline request from `engine`.
    pub fn step<E: OutputEngine>(&mut self, engine: &mut E) {
        let mut record = engine.begin_scanline();
        self.serve(&mut record);
        engine.end_scanline(record);
    }

    /// The permanent consumer loop. Never returns; there is no shutdown path.
    pub fn run<E: OutputEngine>(mut self, mut engine: E) -> ! {
        info!(
            width = self.handle.width(),
            height = self.handle.height(),
            "scanout loop started"
        );
        loop {
            self.step(&mut engine);
        }
    }

    /// Runs [`run`](Self::run) on a dedicated thread named `scanout`, for the
    /// rest of the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn<E>(self, engine: E) -> std::io::Result<JoinHandle<()>>
    where
        E: OutputEngine + Send + 'static,
    {
        thread::Builder::new()
            .name("scanout".to_string())
            .spawn(move || self.run(engine))
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> ScanoutStats {
        self.stats
    }

    /// The consumer half of the frame handoff.
    #[must_use]
    pub fn handle(&self) -> &ScanoutHandle {
        &self.handle
    }

    /// The synthesizer in use.
    #[must_use]
    pub fn synthesizer(&self) -> &ScanlineSynthesizer {
        &self.synth
    }
}
