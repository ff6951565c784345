use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::config::Settings;
use crate::playlist::{PlaylistStore, StoreError};
use crate::ui;

use super::{actions, input};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Remove,
    Play,
    Edit,
    Search,
    Sort,
    Help,
    Exit,
}

pub fn parse_choice(answer: &str) -> Option<MenuChoice> {
    match answer.trim() {
        "1" => Some(MenuChoice::Add),
        "2" => Some(MenuChoice::View),
        "3" => Some(MenuChoice::Remove),
        "4" => Some(MenuChoice::Play),
        "5" => Some(MenuChoice::Edit),
        "6" => Some(MenuChoice::Search),
        "7" => Some(MenuChoice::Sort),
        "8" => Some(MenuChoice::Help),
        "9" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// The interactive menu shell. Owns the store and knows where to save
/// it; the per-option flows live in `actions`.
pub struct Shell {
    pub(super) store: PlaylistStore,
    pub(super) settings: Settings,
    pub(super) base: PathBuf,
    pub(super) data_dir: PathBuf,
    playlist_path: PathBuf,
}

impl Shell {
    pub fn new(
        store: PlaylistStore,
        settings: Settings,
        base: PathBuf,
        data_dir: PathBuf,
        playlist_path: PathBuf,
    ) -> Self {
        Self {
            store,
            settings,
            base,
            data_dir,
            playlist_path,
        }
    }

    /// Persist the playlist. Called after every mutating action so a
    /// crash never loses more than the current prompt.
    pub(super) fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.playlist_path, &self.base)
    }

    /// Show a transient message and give the user time to read it
    /// before the next screen wipes it away.
    pub(super) fn flash(&self, out: &mut impl Write, line: &str) -> io::Result<()> {
        writeln!(out, "{line}")?;
        out.flush()?;
        thread::sleep(Duration::from_millis(self.settings.ui.message_ms));
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut out = io::stdout();

        loop {
            ui::clear_screen(&mut out)?;
            write!(out, "{}", ui::banner(&self.settings.ui.header_text))?;
            writeln!(out, "  {} track(s) on the playlist\n", self.store.len())?;
            write!(out, "{}", ui::menu())?;

            let answer = input::read_line(&mut reader, &mut out, "\nChoose an option (1-9): ")?;
            match parse_choice(&answer) {
                Some(MenuChoice::Add) => actions::add_track(self, &mut reader, &mut out)?,
                Some(MenuChoice::View) => actions::view_playlist(self, &mut reader, &mut out)?,
                Some(MenuChoice::Remove) => actions::remove_track(self, &mut reader, &mut out)?,
                Some(MenuChoice::Play) => {
                    if actions::play_track(self, &mut reader, &mut out)? {
                        break;
                    }
                }
                Some(MenuChoice::Edit) => actions::edit_track(self, &mut reader, &mut out)?,
                Some(MenuChoice::Search) => actions::search(self, &mut reader, &mut out)?,
                Some(MenuChoice::Sort) => actions::sort_playlist(self, &mut reader, &mut out)?,
                Some(MenuChoice::Help) => actions::show_help(self, &mut reader, &mut out)?,
                Some(MenuChoice::Exit) => break,
                None => self.flash(
                    &mut out,
                    &ui::error_line("Please choose a number between 1 and 9."),
                )?,
            }
        }

        writeln!(out, "Goodbye!")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_number_maps_to_one_choice() {
        assert_eq!(parse_choice("1"), Some(MenuChoice::Add));
        assert_eq!(parse_choice("2"), Some(MenuChoice::View));
        assert_eq!(parse_choice("3"), Some(MenuChoice::Remove));
        assert_eq!(parse_choice("4"), Some(MenuChoice::Play));
        assert_eq!(parse_choice("5"), Some(MenuChoice::Edit));
        assert_eq!(parse_choice("6"), Some(MenuChoice::Search));
        assert_eq!(parse_choice("7"), Some(MenuChoice::Sort));
        assert_eq!(parse_choice("8"), Some(MenuChoice::Help));
        assert_eq!(parse_choice("9"), Some(MenuChoice::Exit));
    }

    #[test]
    fn choice_parsing_trims_and_rejects_everything_else() {
        assert_eq!(parse_choice(" 4 "), Some(MenuChoice::Play));
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("10"), None);
        assert_eq!(parse_choice("play"), None);
        assert_eq!(parse_choice(""), None);
    }
}
