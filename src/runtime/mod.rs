//! Application entry point: settings, storage bootstrap and the menu
//! shell that ties the playlist store to the playback session.

use std::env;

use crate::playlist::PlaylistStore;

mod actions;
mod input;
mod menu;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let base = env::current_dir()?;
    let data_dir = if settings.storage.data_dir.is_absolute() {
        settings.storage.data_dir.clone()
    } else {
        base.join(&settings.storage.data_dir)
    };
    // Without the data directory nothing can be persisted, so a failure
    // here ends the program with a clear message.
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| format!("cannot create data directory {}: {e}", data_dir.display()))?;

    let playlist_path = data_dir.join(&settings.storage.playlist_file);
    // A corrupt playlist is fatal rather than silently replaced; the
    // file stays on disk for the user to inspect.
    let store = PlaylistStore::load(&playlist_path, &base)
        .map_err(|e| format!("cannot read playlist {}: {e}", playlist_path.display()))?;

    let mut shell = menu::Shell::new(store, settings, base, data_dir, playlist_path);
    shell.run()
}
