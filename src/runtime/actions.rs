//! The per-menu-option flows: prompt, mutate the store, save, report.

use std::error::Error;
use std::io::{BufRead, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::playback::{PlaybackSession, RodioEngine, SessionExit};
use crate::playlist::{SortKey, Track, TrackEdit, probe_duration, resolve_audio_file};
use crate::ui;

use super::input;
use super::menu::Shell;

type ActionResult = Result<(), Box<dyn Error>>;

pub fn add_track(shell: &mut Shell, input: &mut impl BufRead, out: &mut impl Write) -> ActionResult {
    ui::clear_screen(out)?;
    writeln!(out, "{}\n", ui::info_line("Add a track"))?;

    let title = input::read_nonempty(input, out, "Title: ")?;
    let artist = {
        let answer = input::read_line(input, out, "Artist (blank for default): ")?;
        if answer.is_empty() {
            shell.settings.ui.default_artist.clone()
        } else {
            answer
        }
    };
    let album = input::read_nonempty(input, out, "Album: ")?;
    let year = input::read_year(input, out, "Year: ")?;
    let raw_path = input::read_nonempty(input, out, "Audio file path: ")?;

    // A bad path abandons the whole entry instead of storing a track
    // that can never play.
    let path = match resolve_audio_file(&raw_path, &shell.data_dir) {
        Ok(p) => p,
        Err(e) => {
            shell.flash(out, &ui::error_line(&format!("Track not added: {e}")))?;
            return Ok(());
        }
    };
    let duration = probe_duration(&path);

    shell.store.push(Track {
        title: title.clone(),
        artist,
        album,
        year,
        path,
        duration,
    });
    shell.save()?;
    shell.flash(out, &ui::success_line(&format!("Added '{title}' to the playlist.")))?;
    Ok(())
}

pub fn view_playlist(
    shell: &mut Shell,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ActionResult {
    ui::clear_screen(out)?;
    write!(out, "{}", ui::playlist_table(shell.store.tracks()))?;
    input::pause_for_enter(input, out)?;
    Ok(())
}

pub fn remove_track(
    shell: &mut Shell,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ActionResult {
    ui::clear_screen(out)?;
    if shell.store.is_empty() {
        shell.flash(out, &ui::info_line("The playlist is empty."))?;
        return Ok(());
    }

    write!(out, "{}", ui::playlist_table(shell.store.tracks()))?;
    let number = input::read_number(input, out, "\nRemove which track (0 cancels)? ")?;
    if number == 0 {
        return Ok(());
    }
    let Some(title) = shell.store.get(number).map(|t| t.title.clone()) else {
        shell.flash(out, &ui::error_line(&format!("There is no track {number}.")))?;
        return Ok(());
    };

    if input::confirm(input, out, &format!("Remove '{title}'? [y/N] "))? {
        shell.store.remove(number)?;
        shell.save()?;
        shell.flash(out, &ui::success_line(&format!("Removed '{title}'.")))?;
    } else {
        shell.flash(out, &ui::info_line("Nothing removed."))?;
    }
    Ok(())
}

/// Returns `true` when the user asked to quit the whole application
/// from inside the playback screen.
pub fn play_track(
    shell: &mut Shell,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool, Box<dyn Error>> {
    ui::clear_screen(out)?;
    if shell.store.is_empty() {
        shell.flash(out, &ui::info_line("The playlist is empty."))?;
        return Ok(false);
    }

    write!(out, "{}", ui::playlist_table(shell.store.tracks()))?;
    let number = input::read_number(input, out, "\nPlay which track (0 cancels)? ")?;
    if number == 0 {
        return Ok(false);
    }
    let Some(track) = shell.store.get(number) else {
        shell.flash(out, &ui::error_line(&format!("There is no track {number}.")))?;
        return Ok(false);
    };

    let engine = match RodioEngine::new() {
        Ok(engine) => engine,
        Err(e) => {
            shell.flash(out, &ui::error_line(&format!("No audio device: {e}")))?;
            return Ok(false);
        }
    };
    let mut session = PlaybackSession::new(engine, track, &shell.settings.playback);

    enable_raw_mode()?;
    execute!(out, Hide)?;
    let result = session.run(out);
    disable_raw_mode()?;
    execute!(out, Show)?;

    match result {
        Ok(SessionExit::QuitRequested) => Ok(true),
        Ok(_) => Ok(false),
        Err(e) => {
            shell.flash(out, &ui::error_line(&format!("Playback failed: {e}")))?;
            Ok(false)
        }
    }
}

pub fn edit_track(
    shell: &mut Shell,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ActionResult {
    ui::clear_screen(out)?;
    if shell.store.is_empty() {
        shell.flash(out, &ui::info_line("The playlist is empty."))?;
        return Ok(());
    }

    write!(out, "{}", ui::playlist_table(shell.store.tracks()))?;
    let number = input::read_number(input, out, "\nEdit which track (0 cancels)? ")?;
    if number == 0 {
        return Ok(());
    }
    let Some(current) = shell.store.get(number) else {
        shell.flash(out, &ui::error_line(&format!("There is no track {number}.")))?;
        return Ok(());
    };

    writeln!(
        out,
        "\n  1. Title:     {}\n  2. Artist:    {}\n  3. Album:     {}\n  4. Year:      {}\n  5. File path: {}",
        current.title,
        current.artist,
        current.album,
        current.year,
        current.path.display()
    )?;
    let field = input::read_line(input, out, "Edit which field (1-5)? ")?;
    let edit = match field.as_str() {
        "1" => TrackEdit::Title(input::read_nonempty(input, out, "New title: ")?),
        "2" => TrackEdit::Artist(input::read_nonempty(input, out, "New artist: ")?),
        "3" => TrackEdit::Album(input::read_nonempty(input, out, "New album: ")?),
        "4" => TrackEdit::Year(input::read_year(input, out, "New year: ")?),
        "5" => TrackEdit::Filepath(input::read_nonempty(input, out, "New audio file path: ")?),
        _ => {
            shell.flash(out, &ui::error_line("Please choose a field between 1 and 5."))?;
            return Ok(());
        }
    };

    let data_dir = shell.data_dir.clone();
    match shell.store.edit(number, edit, &data_dir) {
        Ok(()) => {
            shell.save()?;
            shell.flash(out, &ui::success_line("Track updated."))?;
        }
        Err(e) => shell.flash(out, &ui::error_line(&format!("Track unchanged: {e}")))?,
    }
    Ok(())
}

pub fn search(shell: &mut Shell, input: &mut impl BufRead, out: &mut impl Write) -> ActionResult {
    ui::clear_screen(out)?;
    let term = input::read_nonempty(input, out, "Search title or album: ")?;
    let hits: Vec<_> = shell.store.search(&term).collect();

    writeln!(out)?;
    write!(out, "{}", ui::search_results(&hits))?;
    input::pause_for_enter(input, out)?;
    Ok(())
}

pub fn sort_playlist(
    shell: &mut Shell,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ActionResult {
    ui::clear_screen(out)?;
    writeln!(out, "  1. Title\n  2. Album\n  3. Year\n  4. Duration")?;
    let answer = input::read_line(input, out, "\nSort by (1-4): ")?;
    let key = match answer.as_str() {
        "1" => SortKey::Title,
        "2" => SortKey::Album,
        "3" => SortKey::Year,
        "4" => SortKey::Duration,
        _ => {
            shell.flash(out, &ui::error_line("Please choose a field between 1 and 4."))?;
            return Ok(());
        }
    };

    shell.store.sort_by(key);
    shell.save()?;
    shell.flash(out, &ui::success_line("Playlist sorted and saved."))?;
    Ok(())
}

pub fn show_help(
    shell: &mut Shell,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ActionResult {
    ui::clear_screen(out)?;
    write!(
        out,
        "{}",
        ui::help_text(
            shell.settings.playback.seek_seconds,
            shell.settings.playback.volume_step
        )
    )?;
    input::pause_for_enter(input, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    use crate::config::Settings;
    use crate::playlist::PlaylistStore;

    fn track(title: &str) -> Track {
        Track {
            title: title.to_string(),
            artist: "BTS".to_string(),
            album: "BE".to_string(),
            year: 2020,
            path: PathBuf::from(format!("/music/{title}.mp3")),
            duration: 199.0,
        }
    }

    fn shell_with(tracks: Vec<Track>) -> (Shell, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_path_buf();
        let data_dir = base.join("playlist_data");
        std::fs::create_dir_all(&data_dir).unwrap();
        let playlist_path = data_dir.join("playlist.dat");

        let mut settings = Settings::default();
        settings.ui.message_ms = 0;

        let shell = Shell::new(
            PlaylistStore::from_tracks(tracks),
            settings,
            base,
            data_dir,
            playlist_path,
        );
        (shell, dir)
    }

    #[test]
    fn add_aborts_on_a_path_that_is_not_an_audio_file() {
        let (mut shell, _dir) = shell_with(vec![]);
        let mut input = Cursor::new(b"Dynamite\nBTS\nBE\n2020\n/no/such/file.mp3\n".to_vec());
        let mut out = Vec::new();

        add_track(&mut shell, &mut input, &mut out).unwrap();
        assert!(shell.store.is_empty());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Track not added"));
    }

    #[test]
    fn blank_artist_falls_back_to_the_configured_default() {
        let (mut shell, dir) = shell_with(vec![]);
        let wav = dir.path().join("song.wav");
        std::fs::write(&wav, b"not really audio").unwrap();

        let text = format!("Song\n\nAlbum\n2001\n{}\n", wav.display());
        let mut input = Cursor::new(text.into_bytes());
        let mut out = Vec::new();

        add_track(&mut shell, &mut input, &mut out).unwrap();
        assert_eq!(shell.store.len(), 1);
        let added = shell.store.get(1).unwrap();
        assert_eq!(added.artist, "Unknown Artist");
        // Unreadable metadata is a zero duration, not a failure.
        assert_eq!(added.duration, 0.0);
    }

    #[test]
    fn remove_needs_explicit_confirmation() {
        let (mut shell, _dir) = shell_with(vec![track("Dynamite"), track("Butter")]);

        let mut input = Cursor::new(b"1\nn\n".to_vec());
        let mut out = Vec::new();
        remove_track(&mut shell, &mut input, &mut out).unwrap();
        assert_eq!(shell.store.len(), 2);

        let mut input = Cursor::new(b"1\ny\n".to_vec());
        let mut out = Vec::new();
        remove_track(&mut shell, &mut input, &mut out).unwrap();
        assert_eq!(shell.store.len(), 1);
        assert_eq!(shell.store.get(1).unwrap().title, "Butter");
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Removed 'Dynamite'"));
    }

    #[test]
    fn zero_cancels_a_remove() {
        let (mut shell, _dir) = shell_with(vec![track("Dynamite")]);
        let mut input = Cursor::new(b"0\n".to_vec());
        let mut out = Vec::new();

        remove_track(&mut shell, &mut input, &mut out).unwrap();
        assert_eq!(shell.store.len(), 1);
    }

    #[test]
    fn remove_rejects_a_number_past_the_end() {
        let (mut shell, _dir) = shell_with(vec![track("Dynamite")]);
        let mut input = Cursor::new(b"7\n".to_vec());
        let mut out = Vec::new();

        remove_track(&mut shell, &mut input, &mut out).unwrap();
        assert_eq!(shell.store.len(), 1);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("no track 7"));
    }

    #[test]
    fn edit_rewrites_one_field_and_saves() {
        let (mut shell, dir) = shell_with(vec![track("Dynamite")]);

        let mut input = Cursor::new(b"1\n4\n2021\n".to_vec());
        let mut out = Vec::new();
        edit_track(&mut shell, &mut input, &mut out).unwrap();
        assert_eq!(shell.store.get(1).unwrap().year, 2021);

        // The save after the edit must be loadable again.
        let reloaded = PlaylistStore::load(
            &dir.path().join("playlist_data").join("playlist.dat"),
            dir.path(),
        )
        .unwrap();
        assert_eq!(reloaded.get(1).unwrap().year, 2021);
    }

    #[test]
    fn sort_by_title_reorders_and_saves() {
        let (mut shell, _dir) = shell_with(vec![track("Dynamite"), track("Butter")]);
        let mut input = Cursor::new(b"1\n".to_vec());
        let mut out = Vec::new();

        sort_playlist(&mut shell, &mut input, &mut out).unwrap();
        assert_eq!(shell.store.get(1).unwrap().title, "Butter");
        assert_eq!(shell.store.get(2).unwrap().title, "Dynamite");
    }
}
