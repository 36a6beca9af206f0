//! Commands for the terminal driver (`codriver drive`).
//!
//! ```text
//! n | next            next note
//! p | prev            previous note
//! l | load <source>   load a file or URL
//! t | text <notes>    load notes typed or dictated inline, `;` between notes
//! q | quit
//! ```

use thiserror::Error;

use crate::models::CursorSnapshot;
use crate::source::NoteSource;

pub const HELP: &str = "commands: n(ext), p(rev), l <source>, t <note;note;...>, q(uit)";

/// Separates notes in an inline `t` command.
const INLINE_NOTE_BREAK: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveCommand {
    Next,
    Previous,
    Load(NoteSource),
    /// Raw note text, one note per line.
    Text(String),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("stdin is busy with commands, use t <notes>")]
    StdinBusy,

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown command: {0}")]
    Unknown(String),
}

impl DriveCommand {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let parsed = match command {
            "" => return Ok(None),
            "n" | "next" => Self::Next,
            "p" | "prev" => Self::Previous,
            "l" | "load" => {
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("load"));
                }
                match NoteSource::from(arg) {
                    NoteSource::Stdin => return Err(CommandError::StdinBusy),
                    source => Self::Load(source),
                }
            }
            "t" | "text" => Self::Text(arg.replace(INLINE_NOTE_BREAK, "\n")),
            "q" | "quit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(parsed))
    }
}

/// What the driver prints for a cursor update.
pub fn render_snapshot(snapshot: &CursorSnapshot) -> String {
    match (&snapshot.note, snapshot.position) {
        (Some(note), Some(position)) => format!(
            "[{}/{}] {}\nsay: {}",
            position + 1,
            snapshot.total,
            note,
            snapshot.spoken_text()
        ),
        _ => "[0/0] no pace notes".to_string(),
    }
}
