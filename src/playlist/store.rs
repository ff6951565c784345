use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::codec::{self, CodecError};
use super::model::{Track, YEAR_MAX, YEAR_MIN, valid_year};
use super::probe::{AudioFileError, probe_duration, resolve_audio_file};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("track {0} is out of range")]
    OutOfRange(usize),
    #[error("year {0} must be between {YEAR_MIN} and {YEAR_MAX}")]
    YearOutOfRange(i32),
    #[error(transparent)]
    Audio(#[from] AudioFileError),
    #[error("playlist file is corrupt: {0}")]
    Corrupt(#[from] CodecError),
    #[error("playlist i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Sortable track fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Album,
    Year,
    Duration,
}

/// A single-field replacement for an existing track.
#[derive(Debug, Clone)]
pub enum TrackEdit {
    Title(String),
    Artist(String),
    Album(String),
    Year(i32),
    /// New audio path as typed by the user; validated and re-probed
    /// before it replaces the old one.
    Filepath(String),
}

/// In-memory ordered playlist plus persistence.
///
/// Indices exposed by the mutating operations are 1-based, matching the
/// numbering shown to the user in the playlist table.
#[derive(Debug, Default)]
pub struct PlaylistStore {
    tracks: Vec<Track>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by its displayed (1-based) number.
    pub fn get(&self, number: usize) -> Option<&Track> {
        self.index_of(number).ok().map(|i| &self.tracks[i])
    }

    /// Append a track. Field validation happens upstream, before the
    /// record is constructed.
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove the track at the displayed number, returning its title
    /// for the confirmation message. The caller is expected to have
    /// asked the user first.
    pub fn remove(&mut self, number: usize) -> Result<String, StoreError> {
        let idx = self.index_of(number)?;
        Ok(self.tracks.remove(idx).title)
    }

    /// Replace a single field of the track at the displayed number.
    ///
    /// A path change re-runs file validation against the working
    /// directory and `data_dir` and re-derives the duration; on failure
    /// the old path and duration are left untouched.
    pub fn edit(
        &mut self,
        number: usize,
        edit: TrackEdit,
        data_dir: &Path,
    ) -> Result<(), StoreError> {
        let idx = self.index_of(number)?;
        let track = &mut self.tracks[idx];

        match edit {
            TrackEdit::Title(title) => track.title = title,
            TrackEdit::Artist(artist) => track.artist = artist,
            TrackEdit::Album(album) => track.album = album,
            TrackEdit::Year(year) => {
                if !valid_year(year) {
                    return Err(StoreError::YearOutOfRange(year));
                }
                track.year = year;
            }
            TrackEdit::Filepath(raw) => {
                let resolved = resolve_audio_file(&raw, data_dir)?;
                track.duration = probe_duration(&resolved);
                track.path = resolved;
            }
        }

        Ok(())
    }

    /// Case-insensitive substring search over title and album, yielding
    /// `(original_index, track)` pairs in playlist order.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = (usize, &'a Track)> + 'a {
        let needle = term.to_lowercase();
        self.tracks.iter().enumerate().filter(move |(_, t)| {
            t.title.to_lowercase().contains(&needle) || t.album.to_lowercase().contains(&needle)
        })
    }

    /// Sort ascending by the chosen field. The relative order of
    /// equal-key tracks is unspecified.
    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Title => self.tracks.sort_by(|a, b| a.title.cmp(&b.title)),
            SortKey::Album => self.tracks.sort_by(|a, b| a.album.cmp(&b.album)),
            SortKey::Year => self.tracks.sort_by(|a, b| a.year.cmp(&b.year)),
            SortKey::Duration => {
                self.tracks.sort_by(|a, b| a.duration.total_cmp(&b.duration));
            }
        }
    }

    /// Load a playlist from `path`, resolving stored relative paths
    /// against `base`. A missing file is an empty playlist; a short or
    /// malformed file is an error, never an out-of-bounds read.
    pub fn load(path: &Path, base: &Path) -> Result<Self, StoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            tracks: codec::decode(&bytes, base)?,
        })
    }

    /// Rewrite the playlist file in full, storing paths relative to
    /// `base` where possible.
    pub fn save(&self, path: &Path, base: &Path) -> Result<(), StoreError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, codec::encode(&self.tracks, base))?;
        Ok(())
    }

    fn index_of(&self, number: usize) -> Result<usize, StoreError> {
        if number == 0 || number > self.tracks.len() {
            Err(StoreError::OutOfRange(number))
        } else {
            Ok(number - 1)
        }
    }
}
