//! `rodio`-backed engine implementation.
//!
//! Seeking works by rebuilding the sink with `Source::skip_duration`,
//! which handles the common formats without relying on codec-level seek
//! support. Elapsed time is tracked as the skip offset plus accumulated
//! play time, frozen while paused.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::engine::{Engine, EngineStatus, PlaybackError};

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    path: PathBuf,
    duration: Duration,
    paused: bool,
    /// Position the current sink started decoding at.
    base: Duration,
    started_at: Option<Instant>,
    /// Play time consumed on the current sink before the last pause.
    accumulated: Duration,
    volume: u8,
}

impl RodioEngine {
    pub fn new() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a console app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: PathBuf::new(),
            duration: Duration::ZERO,
            paused: true,
            base: Duration::ZERO,
            started_at: None,
            accumulated: Duration::ZERO,
            volume: 100,
        })
    }

    /// Build a paused sink for the current track starting at `start_at`.
    fn make_sink(&self, start_at: Duration) -> Result<(Sink, Option<Duration>), PlaybackError> {
        let file = File::open(&self.path).map_err(|source| PlaybackError::Open {
            path: self.path.clone(),
            source,
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
            path: self.path.clone(),
            source,
        })?;
        let total = source.total_duration();
        // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
        let source = source.skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(f32::from(self.volume) / 100.0);
        sink.append(source);
        sink.pause();
        Ok((sink, total))
    }
}

impl Engine for RodioEngine {
    fn open(&mut self, path: &Path) -> Result<Duration, PlaybackError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        self.path = path.to_path_buf();
        let (sink, total) = self.make_sink(Duration::ZERO)?;

        self.sink = Some(sink);
        self.duration = total.unwrap_or(Duration::ZERO);
        self.paused = true;
        self.base = Duration::ZERO;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        Ok(self.duration)
    }

    fn play(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
            if self.paused {
                self.paused = false;
                self.started_at = Some(Instant::now());
            }
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            if !self.paused {
                sink.pause();
                if let Some(started) = self.started_at.take() {
                    self.accumulated += started.elapsed();
                }
                self.paused = true;
            }
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.paused = true;
        self.base = Duration::ZERO;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn seek_to(&mut self, pos: Duration) -> Result<(), PlaybackError> {
        if self.sink.is_none() {
            return Ok(());
        }

        let pos = if self.duration > Duration::ZERO {
            pos.min(self.duration)
        } else {
            pos
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let (sink, _) = self.make_sink(pos)?;
        if self.paused {
            self.started_at = None;
        } else {
            sink.play();
            self.started_at = Some(Instant::now());
        }

        self.sink = Some(sink);
        self.base = pos;
        self.accumulated = Duration::ZERO;
        Ok(())
    }

    fn position(&self) -> Duration {
        let running = self
            .started_at
            .map_or(Duration::ZERO, |started| started.elapsed());
        let pos = self.base + self.accumulated + running;
        if self.duration > Duration::ZERO {
            pos.min(self.duration)
        } else {
            pos
        }
    }

    fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(f32::from(self.volume) / 100.0);
        }
    }

    fn status(&self) -> EngineStatus {
        match self.sink.as_ref() {
            None => EngineStatus::Stopped,
            Some(sink) if sink.empty() => EngineStatus::Stopped,
            Some(_) if self.paused => EngineStatus::Paused,
            Some(_) => EngineStatus::Playing,
        }
    }
}
