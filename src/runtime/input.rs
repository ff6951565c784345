//! Line-oriented prompt helpers for the menu shell.
//!
//! Every prompt takes the reader and writer explicitly so the flows can
//! be driven by an in-memory cursor in tests.

use std::io::{self, BufRead, Write};

use crate::playlist::{YEAR_MAX, YEAR_MIN, valid_year};
use crate::ui;

/// Print a prompt and read one trimmed line. End of input is an error,
/// not an empty answer, so reprompt loops cannot spin.
pub fn read_line(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    Ok(line.trim().to_string())
}

/// Reprompt until the answer is non-blank.
pub fn read_nonempty(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> io::Result<String> {
    loop {
        let answer = read_line(input, out, prompt)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        writeln!(out, "{}", ui::error_line("This field cannot be blank."))?;
    }
}

/// Reprompt until the answer parses as a number. Zero is accepted; the
/// flows treat it as cancel.
pub fn read_number(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> io::Result<usize> {
    loop {
        let answer = read_line(input, out, prompt)?;
        match answer.parse::<usize>() {
            Ok(n) => return Ok(n),
            Err(_) => writeln!(out, "{}", ui::error_line("Please enter a track number."))?,
        }
    }
}

/// Reprompt until the answer is a year inside the accepted range.
pub fn read_year(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<i32> {
    loop {
        let answer = read_line(input, out, prompt)?;
        match answer.parse::<i32>() {
            Ok(y) if valid_year(y) => return Ok(y),
            _ => writeln!(
                out,
                "{}",
                ui::error_line(&format!(
                    "Please enter a year between {YEAR_MIN} and {YEAR_MAX}."
                ))
            )?,
        }
    }
}

/// A yes/no question that defaults to no.
pub fn confirm(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<bool> {
    let answer = read_line(input, out, prompt)?;
    Ok(matches!(answer.as_str(), "y" | "Y" | "yes" | "Yes"))
}

pub fn pause_for_enter(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    read_line(input, out, "\nPress Enter to continue...")?;
    Ok(())
}
