//! Binary playlist codec.
//!
//! The on-disk layout is little-endian with no header or version field:
//! a `u64` record count, then per record four `u64`-length-prefixed
//! strings (title, artist, filepath, album), an `i32` year and an `f32`
//! duration. File paths under the base directory are stored relative to
//! it so the file survives moving the whole tree; they are rejoined
//! against the base on load.
//!
//! Decoding never trusts a length prefix: every read is bounds-checked
//! and a short buffer is reported as corrupt data instead of read past.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::Track;

/// Smallest possible record: four empty strings, year, duration.
const MIN_RECORD_LEN: u64 = 4 * 8 + 4 + 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of data while reading {0}")]
    Truncated(&'static str),
    #[error("{0} is not valid utf-8")]
    Utf8(&'static str),
    #[error("implausible record count {0}")]
    BadCount(u64),
}

/// Serialize `tracks` into the binary playlist layout, storing paths
/// relative to `base` where possible.
pub fn encode(tracks: &[Track], base: &Path) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(tracks.len() as u64).to_le_bytes());

    for track in tracks {
        let path = relative_to(&track.path, base);
        let path = path.to_string_lossy();

        write_str(&mut out, &track.title);
        write_str(&mut out, &track.artist);
        write_str(&mut out, &path);
        write_str(&mut out, &track.album);
        out.extend_from_slice(&track.year.to_le_bytes());
        out.extend_from_slice(&track.duration.to_le_bytes());
    }

    out
}

/// Deserialize a playlist, resolving relative paths against `base`.
/// Trailing bytes after the declared records are ignored.
pub fn decode(bytes: &[u8], base: &Path) -> Result<Vec<Track>, CodecError> {
    let mut reader = Reader { buf: bytes };
    let count = reader.read_u64("record count")?;

    // Reject counts the remaining buffer cannot possibly hold before
    // allocating anything.
    let need = count
        .checked_mul(MIN_RECORD_LEN)
        .ok_or(CodecError::BadCount(count))?;
    if need > reader.remaining() as u64 {
        return Err(CodecError::Truncated("records"));
    }

    let mut tracks = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let title = reader.read_string("title")?;
        let artist = reader.read_string("artist")?;
        let filepath = reader.read_string("filepath")?;
        let album = reader.read_string("album")?;
        let year = reader.read_i32("year")?;
        let duration = reader.read_f32("duration")?;

        tracks.push(Track {
            title,
            artist,
            album,
            year,
            path: resolve_path(Path::new(&filepath), base),
            duration,
        });
    }

    Ok(tracks)
}

/// Rejoin a stored path against the base directory.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

fn write_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u64).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], CodecError> {
        if self.buf.len() < n {
            return Err(CodecError::Truncated(what));
        }
        let (head, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(head)
    }

    fn read_u64(&mut self, what: &'static str) -> Result<u64, CodecError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8, what)?);
        Ok(u64::from_le_bytes(raw))
    }

    fn read_i32(&mut self, what: &'static str) -> Result<i32, CodecError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(4, what)?);
        Ok(i32::from_le_bytes(raw))
    }

    fn read_f32(&mut self, what: &'static str) -> Result<f32, CodecError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(4, what)?);
        Ok(f32::from_le_bytes(raw))
    }

    fn read_string(&mut self, what: &'static str) -> Result<String, CodecError> {
        let len = self.read_u64(what)?;
        if len > self.remaining() as u64 {
            return Err(CodecError::Truncated(what));
        }
        let bytes = self.take(len as usize, what)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::Utf8(what))
    }
}
