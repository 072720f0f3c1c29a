//! Shared CLI helpers: status lines and keyboard waits.

use anyhow::Result;
use console::style;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::Write;

/// Outcome flavor of a status line.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    Info,
    Ok,
    Warn,
    Bad,
}

/// Print a status message with a severity marker. Every user-visible
/// outcome of a command goes through here.
pub fn status(kind: Status, msg: &str) {
    let marker = match kind {
        Status::Info => style("i").blue(),
        Status::Ok => style("✓").green(),
        Status::Warn => style("!").yellow(),
        Status::Bad => style("✗").red(),
    };
    eprintln!("{marker} {msg}");
}

/// Block until the user presses Enter, without echoing other keys.
pub fn wait_for_enter() -> Result<()> {
    std::io::stdout().flush()?;

    enable_raw_mode()?;
    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.code == KeyCode::Enter {
                break;
            }
        }
    }
    disable_raw_mode()?;

    Ok(())
}
