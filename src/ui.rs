//! Rendering helpers for the console shell and the playback screen.
//!
//! The shell runs in cooked mode and prints with `\n`; the playback
//! screen runs in raw mode, so every frame line ends with `\r\n` and
//! the whole frame is returned as one string so the caller can skip
//! redraws when nothing changed.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use crate::playlist::Track;

const BAR_WIDTH: usize = 50;
const TITLE_COL: usize = 28;
const ARTIST_COL: usize = 20;
const ALBUM_COL: usize = 20;

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// The banner box drawn above the main menu.
pub fn banner(header_text: &str) -> String {
    let inner = header_text.len().max(20);
    let top = format!("╔{}╗", "═".repeat(inner));
    let mid = format!("║{:^inner$}║", header_text);
    let bottom = format!("╚{}╝", "═".repeat(inner));
    format!("{}\n{}\n{}\n", top, mid.bold(), bottom)
}

pub fn menu() -> String {
    let mut s = String::new();
    s.push_str(&format!("{}\n", "Main Menu".bold().underlined()));
    s.push_str("  1. Add a track\n");
    s.push_str("  2. View playlist\n");
    s.push_str("  3. Remove a track\n");
    s.push_str("  4. Play a track\n");
    s.push_str("  5. Edit a track\n");
    s.push_str("  6. Search\n");
    s.push_str("  7. Sort playlist\n");
    s.push_str("  8. Help\n");
    s.push_str("  9. Exit\n");
    s
}

/// The help screen, reflecting the configured seek and volume steps.
pub fn help_text(seek_seconds: u64, volume_step: u8) -> String {
    let mut s = String::new();
    s.push_str(&format!("{}\n\n", "Playback controls".bold()));
    s.push_str("  [space]  pause / resume\n");
    s.push_str("  [q]      stop, back to the menu\n");
    s.push_str("  [Esc]    stop and quit the application\n");
    s.push_str("  [r]      restart the track\n");
    s.push_str(&format!("  [< / >]  seek back / forward {}s\n", seek_seconds));
    s.push_str(&format!("  [- / +]  volume down / up {}%\n", volume_step));
    s.push_str("  [l]      toggle repeat\n\n");
    s.push_str("Tracks are saved automatically after every change.\n");
    s
}

fn truncate(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Render the playlist as a numbered table. Row numbers are 1-based,
/// matching what every prompt in the shell asks for.
pub fn playlist_table(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return format!("{}\n", "The playlist is empty.".dim());
    }

    let mut s = String::new();
    s.push_str(&format!(
        "{}\n",
        format!(
            " #   {:<TITLE_COL$} {:<ARTIST_COL$} {:<ALBUM_COL$} {:>4}  {:>6}",
            "Title", "Artist", "Album", "Year", "Length"
        )
        .bold()
    ));
    s.push_str(&format!(
        "{}\n",
        "─".repeat(4 + TITLE_COL + ARTIST_COL + ALBUM_COL + 16)
    ));
    for (i, t) in tracks.iter().enumerate() {
        s.push_str(&format!(
            "{:>2}   {:<TITLE_COL$} {:<ARTIST_COL$} {:<ALBUM_COL$} {:>4}  {:>6}\n",
            i + 1,
            truncate(&t.title, TITLE_COL),
            truncate(&t.artist, ARTIST_COL),
            truncate(&t.album, ALBUM_COL),
            t.year,
            format_duration(t.duration),
        ));
    }
    s
}

/// Render search hits with their original playlist numbers so the user
/// can feed them straight back into Remove / Play / Edit.
pub fn search_results(hits: &[(usize, &Track)]) -> String {
    if hits.is_empty() {
        return format!("{}\n", "No matching tracks.".dim());
    }
    let mut s = String::new();
    for (index, t) in hits {
        s.push_str(&format!(
            "{:>2}   {} - {} [{}] ({})\n",
            index + 1,
            t.title,
            t.artist,
            t.album,
            format_duration(t.duration),
        ));
    }
    s
}

/// Format seconds as `MM:SS`, truncating partial seconds.
pub fn format_duration(secs: f32) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// A fixed-width transport bar. The head marker doubles as the pause
/// indicator.
fn progress_bar(elapsed: Duration, total: Duration, paused: bool) -> String {
    let fraction = if total.is_zero() {
        0.0
    } else {
        (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    };
    let head = (fraction * (BAR_WIDTH - 1) as f64).round() as usize;
    let marker = if paused { '◆' } else { '⬤' };

    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    for i in 0..BAR_WIDTH {
        if i < head {
            bar.push('━');
        } else if i == head {
            bar.push(marker);
        } else {
            bar.push('─');
        }
    }
    bar
}

/// One full playback frame. Raw mode is active while this is shown, so
/// all line endings are `\r\n`.
pub fn playback_frame(
    track: &Track,
    elapsed: Duration,
    total: Duration,
    paused: bool,
    volume: u8,
    repeat: bool,
    seek_seconds: u64,
) -> String {
    let state = if paused { "Paused " } else { "Playing" };
    let repeat_text = if repeat { "on" } else { "off" };

    let mut s = String::new();
    s.push_str(&format!(
        "  Now {}: {} - {}\r\n",
        state, track.title, track.artist
    ));
    s.push_str(&format!("  Album: {} ({})\r\n", track.album, track.year));
    s.push_str("\r\n");
    s.push_str(&format!(
        "  {} {} {}\r\n",
        format_duration(elapsed.as_secs_f32()),
        progress_bar(elapsed, total, paused),
        format_duration(total.as_secs_f32()),
    ));
    s.push_str(&format!(
        "  Volume: {:>3}%   Repeat: {}\r\n",
        volume, repeat_text
    ));
    s.push_str("\r\n");
    s.push_str(&format!(
        "  [space] pause  [q] stop  [Esc] quit  [r] restart  [</>] seek {}s  [-/+] volume  [l] repeat\r\n",
        seek_seconds
    ));
    s
}

pub fn error_line(msg: &str) -> String {
    format!("{}", format!("✗ {}", msg).red())
}

pub fn success_line(msg: &str) -> String {
    format!("{}", format!("✓ {}", msg).green())
}

pub fn info_line(msg: &str) -> String {
    format!("{}", msg.to_string().dim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track() -> Track {
        Track {
            title: "Dynamite".into(),
            artist: "BTS".into(),
            album: "BE".into(),
            year: 2020,
            path: PathBuf::from("/music/dynamite.mp3"),
            duration: 199.0,
        }
    }

    #[test]
    fn format_duration_truncates_to_mmss() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(59.9), "00:59");
        assert_eq!(format_duration(199.0), "03:19");
        assert_eq!(format_duration(-3.0), "00:00");
        assert_eq!(format_duration(3600.0), "60:00");
    }

    #[test]
    fn progress_bar_has_fixed_width_and_moving_head() {
        let total = Duration::from_secs(100);
        let start = progress_bar(Duration::ZERO, total, false);
        let end = progress_bar(total, total, false);
        assert_eq!(start.chars().count(), BAR_WIDTH);
        assert_eq!(end.chars().count(), BAR_WIDTH);
        assert_eq!(start.chars().next(), Some('⬤'));
        assert_eq!(end.chars().last(), Some('⬤'));
    }

    #[test]
    fn progress_bar_marks_pause_and_survives_zero_total() {
        let bar = progress_bar(Duration::from_secs(5), Duration::ZERO, true);
        assert_eq!(bar.chars().next(), Some('◆'));
        assert_eq!(bar.chars().count(), BAR_WIDTH);
    }

    #[test]
    fn playback_frame_uses_crlf_and_shows_transport_state() {
        let t = track();
        let frame = playback_frame(
            &t,
            Duration::from_secs(83),
            Duration::from_secs(199),
            false,
            85,
            false,
            5,
        );
        assert!(frame.contains("Now Playing: Dynamite - BTS"));
        assert!(frame.contains("01:23"));
        assert!(frame.contains("03:19"));
        assert!(frame.contains("Volume:  85%"));
        assert!(frame.contains("Repeat: off"));
        assert!(frame.contains("seek 5s"));
        assert!(!frame.contains('\n') || frame.matches("\r\n").count() == frame.matches('\n').count());
    }

    #[test]
    fn playback_frame_reflects_pause_and_repeat() {
        let t = track();
        let frame = playback_frame(
            &t,
            Duration::from_secs(10),
            Duration::from_secs(199),
            true,
            100,
            true,
            15,
        );
        assert!(frame.contains("Now Paused"));
        assert!(frame.contains("Repeat: on"));
        assert!(frame.contains("seek 15s"));
    }

    #[test]
    fn playlist_table_numbers_rows_from_one() {
        let tracks = vec![track()];
        let table = playlist_table(&tracks);
        assert!(table.contains(" 1 "));
        assert!(table.contains("Dynamite"));
        assert!(table.contains("03:19"));
    }

    #[test]
    fn playlist_table_truncates_long_titles() {
        let mut t = track();
        t.title = "A".repeat(TITLE_COL + 10);
        let table = playlist_table(&[t]);
        assert!(table.contains('…'));
    }

    #[test]
    fn empty_playlist_and_empty_search_have_friendly_text() {
        assert!(playlist_table(&[]).contains("empty"));
        assert!(search_results(&[]).contains("No matching tracks"));
    }

    #[test]
    fn search_results_keep_original_numbers() {
        let t = track();
        let hits = vec![(4usize, &t)];
        let out = search_results(&hits);
        assert!(out.contains(" 5 "));
    }
}
