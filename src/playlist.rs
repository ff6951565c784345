//! Playlist data model and persistence.
//!
//! `PlaylistStore` owns the ordered list of tracks and knows how to
//! serialize it to the fixed-layout binary playlist file.

mod codec;
mod model;
mod probe;
mod store;

pub use codec::CodecError;
pub use model::{Track, YEAR_MAX, YEAR_MIN, valid_year};
pub use probe::{AudioFileError, probe_duration, resolve_audio_file};
pub use store::{PlaylistStore, SortKey, StoreError, TrackEdit};
