//! Single-track playback: the transport session and the audio engine
//! behind it.

mod engine;
mod output;
mod session;

pub use engine::{Engine, EngineStatus, PlaybackError};
pub use output::RodioEngine;
pub use session::{Command, PlaybackSession, SessionExit, command_for_key};
