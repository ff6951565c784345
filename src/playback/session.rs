//! The transport state machine for one track.
//!
//! A cooperative poll loop on the main thread: check for natural end,
//! redraw the progress frame when it is stale, then wait up to one tick
//! for a key and apply at most one transport command per iteration.

use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::config::PlaybackSettings;
use crate::playlist::Track;
use crate::ui;

use super::engine::{Engine, EngineStatus, PlaybackError};

/// Why the session handed control back to the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionExit {
    /// The track played to its natural end (repeat off).
    Finished,
    /// The user stopped playback (`q`).
    Stopped,
    /// The user asked to leave the whole application (`Esc`).
    QuitRequested,
}

/// One transport command, decoded from a single keystroke.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Stop,
    Quit,
    Restart,
    SeekForward,
    SeekBack,
    VolumeUp,
    VolumeDown,
    ToggleRepeat,
}

/// Map a key to its transport command, if any.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char('q') => Some(Command::Stop),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('>') => Some(Command::SeekForward),
        KeyCode::Char('<') => Some(Command::SeekBack),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::VolumeUp),
        KeyCode::Char('-') => Some(Command::VolumeDown),
        KeyCode::Char('l') => Some(Command::ToggleRepeat),
        _ => None,
    }
}

pub struct PlaybackSession<'a, E: Engine> {
    engine: E,
    track: &'a Track,
    total: Duration,
    volume: u8,
    repeat: bool,
    paused: bool,
    seek_step: Duration,
    volume_step: u8,
    tick: Duration,
    redraw_every: Duration,
    /// Last rendered frame; identical frames are not redrawn.
    last_frame: String,
}

impl<'a, E: Engine> PlaybackSession<'a, E> {
    pub fn new(engine: E, track: &'a Track, settings: &PlaybackSettings) -> Self {
        Self {
            engine,
            track,
            total: Duration::ZERO,
            volume: 100,
            repeat: settings.repeat,
            paused: false,
            seek_step: Duration::from_secs(settings.seek_seconds),
            volume_step: settings.volume_step,
            tick: Duration::from_millis(settings.tick_ms),
            redraw_every: Duration::from_millis(settings.redraw_ms),
            last_frame: String::new(),
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn repeat_enabled(&self) -> bool {
        self.repeat
    }

    /// Open the track and start playing. Open failure aborts before the
    /// loop is ever entered.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        let probed = self.engine.open(&self.track.path)?;
        self.total = if probed > Duration::ZERO {
            probed
        } else {
            Duration::from_secs_f32(self.track.duration.max(0.0))
        };

        self.engine.set_volume(self.volume);
        self.engine.play();
        self.paused = false;
        Ok(())
    }

    /// Drive the track until it ends or the user leaves. The caller is
    /// responsible for raw mode and cursor visibility.
    pub fn run(&mut self, out: &mut impl Write) -> Result<SessionExit, PlaybackError> {
        self.start()?;
        execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        let mut last_draw: Option<Instant> = None;
        loop {
            if !self.paused && self.engine.status() == EngineStatus::Stopped {
                if let Some(exit) = self.handle_track_end()? {
                    return Ok(exit);
                }
            }

            if last_draw.is_none_or(|at| at.elapsed() >= self.redraw_every) {
                self.draw(out)?;
                last_draw = Some(Instant::now());
            }

            // The poll timeout doubles as the sleep quantum bounding CPU use.
            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(cmd) = command_for_key(key.code) {
                        if let Some(exit) = self.apply(cmd)? {
                            self.engine.stop();
                            return Ok(exit);
                        }
                        self.draw(out)?;
                        last_draw = Some(Instant::now());
                    }
                }
            }
        }
    }

    /// Apply one transport command; `Some(exit)` means the session is over.
    pub fn apply(&mut self, cmd: Command) -> Result<Option<SessionExit>, PlaybackError> {
        match cmd {
            Command::TogglePause => {
                if self.paused {
                    self.engine.play();
                } else {
                    self.engine.pause();
                }
                self.paused = !self.paused;
            }
            Command::Stop => return Ok(Some(SessionExit::Stopped)),
            Command::Quit => return Ok(Some(SessionExit::QuitRequested)),
            Command::Restart => self.engine.seek_to(Duration::ZERO)?,
            Command::SeekForward => {
                // The engine clamps to the track end.
                let target = self.engine.position() + self.seek_step;
                self.engine.seek_to(target)?;
            }
            Command::SeekBack => {
                let target = self.engine.position().saturating_sub(self.seek_step);
                self.engine.seek_to(target)?;
            }
            Command::VolumeUp => {
                self.volume = (self.volume + self.volume_step).min(100);
                self.engine.set_volume(self.volume);
            }
            Command::VolumeDown => {
                self.volume = self.volume.saturating_sub(self.volume_step);
                self.engine.set_volume(self.volume);
            }
            Command::ToggleRepeat => self.repeat = !self.repeat,
        }

        Ok(None)
    }

    /// Natural end: replay from the top when repeat is on, otherwise
    /// hand control back. Advancing to another track is the caller's
    /// responsibility.
    pub fn handle_track_end(&mut self) -> Result<Option<SessionExit>, PlaybackError> {
        if self.repeat {
            self.engine.seek_to(Duration::ZERO)?;
            self.engine.play();
            self.paused = false;
            Ok(None)
        } else {
            self.engine.stop();
            Ok(Some(SessionExit::Finished))
        }
    }

    fn draw(&mut self, out: &mut impl Write) -> Result<(), PlaybackError> {
        let frame = ui::playback_frame(
            self.track,
            self.engine.position(),
            self.total,
            self.paused,
            self.volume,
            self.repeat,
            self.seek_step.as_secs(),
        );

        if frame != self.last_frame {
            execute!(out, MoveTo(0, 1), Clear(ClearType::FromCursorDown), Print(&frame))?;
            self.last_frame = frame;
        }
        Ok(())
    }
}
