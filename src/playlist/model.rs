use std::path::PathBuf;

/// Earliest release year accepted at entry/edit time.
pub const YEAR_MIN: i32 = 1900;
/// Latest release year accepted at entry/edit time.
pub const YEAR_MAX: i32 = 2100;

/// One playlist entry: user-supplied metadata plus a reference to a
/// local audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Release year, constrained to [`YEAR_MIN`, `YEAR_MAX`] when entered.
    /// Not re-validated on load.
    pub year: i32,
    /// Absolute path to the audio file. Stored relative to the working
    /// directory on disk and rejoined on load.
    pub path: PathBuf,
    /// Probed duration in seconds; 0.0 when the probe failed. Derived,
    /// never edited directly.
    pub duration: f32,
}

/// Whether `year` falls in the accepted range.
pub fn valid_year(year: i32) -> bool {
    (YEAR_MIN..=YEAR_MAX).contains(&year)
}
