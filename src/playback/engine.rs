//! The audio engine capability consumed by `PlaybackSession`.
//!
//! The trait is the seam between the transport state machine and the
//! actual decode/output stack, so the session can be exercised in tests
//! without an audio device.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Playing,
    Paused,
    /// Nothing queued: either never opened or the track ran out.
    Stopped,
}

/// Black-box audio decode/output capability.
pub trait Engine {
    /// Open a track and report its duration (zero when unknown). The
    /// engine is left paused at position zero.
    fn open(&mut self, path: &Path) -> Result<Duration, PlaybackError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Seek to an absolute position, clamped to the track bounds.
    fn seek_to(&mut self, pos: Duration) -> Result<(), PlaybackError>;
    fn position(&self) -> Duration;
    /// Set the output volume as a percentage in [0, 100].
    fn set_volume(&mut self, percent: u8);
    fn status(&self) -> EngineStatus;
}
