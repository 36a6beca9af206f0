//! Delimited text to pace notes.
//!
//! Each non-blank line must hold exactly three fields:
//!
//! ```text
//! radius,direction,distance
//! 6,L,100
//! 0,Crest,200
//! ```
//!
//! Malformed lines are dropped and reported as [`LineDiagnostic`]s; they never
//! abort the rest of the parse.

use crate::models::{DiagnosticKind, LineDiagnostic, NumericField, PaceNote};

const DEFAULT_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 3;

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub separator: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

/// Notes in input order plus the lines that were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub notes: Vec<PaceNote>,
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parse comma separated pace notes.
pub fn parse(raw: &str) -> ParseOutcome {
    parse_with(raw, &ParseOptions::default())
}

/// Parse pace notes using the given options.
pub fn parse_with(raw: &str, options: &ParseOptions) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    // Line numbers refer to the untrimmed input.
    let leading = &raw[..raw.len() - raw.trim_start().len()];
    let first_line = leading.matches('\n').count() + 1;

    for (index, line) in raw.trim().split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line, options.separator) {
            Ok(note) => outcome.notes.push(note),
            Err(kind) => outcome.diagnostics.push(LineDiagnostic {
                line_number: first_line + index,
                line: line.trim_end_matches('\r').to_string(),
                kind,
            }),
        }
    }

    outcome
}

fn parse_line(line: &str, separator: char) -> Result<PaceNote, DiagnosticKind> {
    let fields: Vec<&str> = line.split(separator).map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(DiagnosticKind::WrongFieldCount {
            fields: fields.len(),
        });
    }

    let radius = parse_number(fields[0], NumericField::Radius)?;
    let distance = parse_number(fields[2], NumericField::Distance)?;

    Ok(PaceNote::new(radius, fields[1], distance))
}

fn parse_number(field: &str, which: NumericField) -> Result<i32, DiagnosticKind> {
    field
        .parse()
        .map_err(|_| DiagnosticKind::NumberFormat { field: which })
}
