use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/rondo/config.toml` or `~/.config/rondo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RONDO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the playlist file, relative to the working
    /// directory unless absolute.
    pub data_dir: PathBuf,
    /// Playlist file name inside `data_dir`.
    pub playlist_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("playlist_data"),
            playlist_file: "playlist.dat".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume change per `+`/`-` keypress (percentage points).
    pub volume_step: u8,
    /// Number of seconds to scrub when pressing `<` / `>`.
    pub seek_seconds: u64,
    /// Whether repeat starts enabled for each session.
    pub repeat: bool,
    /// Poll quantum of the transport loop (milliseconds).
    pub tick_ms: u64,
    /// Minimum interval between progress redraws (milliseconds).
    pub redraw_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume_step: 5,
            seek_seconds: 5,
            repeat: false,
            tick_ms: 10,
            redraw_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top banner box.
    pub header_text: String,
    /// Artist recorded when the add prompt is left blank.
    pub default_artist: String,
    /// How long transient error/success messages stay on screen (milliseconds).
    pub message_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ rondo: your playlist, on cue ~ ".to_string(),
            default_artist: "Unknown Artist".to_string(),
            message_ms: 2000,
        }
    }
}
