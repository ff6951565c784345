//! Audio file validation and duration probing.

use std::path::{Path, PathBuf};

use lofty::prelude::*;
use thiserror::Error;

/// Extensions accepted for playlist entries (case-insensitive).
pub const AUDIO_EXTENSIONS: [&str; 4] = ["wav", "ogg", "flac", "mp3"];

#[derive(Debug, Error)]
pub enum AudioFileError {
    #[error("no such audio file: {0}")]
    NotFound(PathBuf),
    #[error("not a regular file: {0}")]
    NotRegular(PathBuf),
    #[error("unsupported audio format: {0} (expected .wav, .ogg, .flac or .mp3)")]
    UnsupportedExtension(PathBuf),
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Validate a user-supplied audio path and return it in absolute form.
///
/// The path is tried as given (absolute, or relative to the working
/// directory), then relative to `data_dir`. The file must exist, be a
/// regular file and carry an accepted extension.
pub fn resolve_audio_file(input: &str, data_dir: &Path) -> Result<PathBuf, AudioFileError> {
    let as_given = PathBuf::from(input);

    let found = if as_given.exists() {
        as_given
    } else {
        let in_data_dir = data_dir.join(input);
        if in_data_dir.exists() {
            in_data_dir
        } else {
            return Err(AudioFileError::NotFound(as_given));
        }
    };

    if !found.is_file() {
        return Err(AudioFileError::NotRegular(found));
    }
    if !is_audio_file(&found) {
        return Err(AudioFileError::UnsupportedExtension(found));
    }

    Ok(std::path::absolute(&found).unwrap_or(found))
}

/// Probe the duration of an audio file in seconds; 0.0 when the file
/// cannot be parsed.
pub fn probe_duration(path: &Path) -> f32 {
    match lofty::read_from_path(path) {
        Ok(tagged) => tagged.properties().duration().as_secs_f32(),
        Err(_) => 0.0,
    }
}
