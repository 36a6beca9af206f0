//! A co-driver session: one cursor plus the parse settings used to feed it.
//!
//! The session is the caller of the parser, so it is where diagnostics are
//! logged. It is cheap to clone; clones share the same cursor and are handed
//! to each presentation layer.

use std::sync::Arc;

use chrono::Utc;

use crate::config::CodriverConfig;
use crate::cursor::NoteCursor;
use crate::models::{LoadReport, PaceNote};
use crate::parser::{self, ParseOptions};
use crate::source::{NoteSource, SourceError};

/// The sample route shown before anything is loaded.
pub fn sample_notes() -> Vec<PaceNote> {
    vec![
        PaceNote::new(6, "L", 100),
        PaceNote::new(4, "R", 50),
        PaceNote::new(0, "Crest", 200),
        PaceNote::new(5, "L", 70),
    ]
}

#[derive(Debug, Clone)]
pub struct Session {
    cursor: Arc<NoteCursor>,
    options: ParseOptions,
}

impl Session {
    pub fn new(cursor: Arc<NoteCursor>, options: ParseOptions) -> Self {
        Self { cursor, options }
    }

    /// Build a session from user configuration.
    pub fn from_config(config: &CodriverConfig) -> Self {
        let notes = if config.seed_sample_notes {
            sample_notes()
        } else {
            Vec::new()
        };
        Self::new(
            Arc::new(NoteCursor::new(notes)),
            ParseOptions {
                separator: config.separator,
            },
        )
    }

    /// A session over the sample route with default parse settings.
    pub fn with_sample_notes() -> Self {
        Self::new(
            Arc::new(NoteCursor::new(sample_notes())),
            ParseOptions::default(),
        )
    }

    pub fn cursor(&self) -> &Arc<NoteCursor> {
        &self.cursor
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `raw` and install the result, whatever it holds.
    ///
    /// A fully malformed input leaves the cursor empty.
    pub fn load_text(&self, raw: &str, source: &str) -> LoadReport {
        let outcome = parser::parse_with(raw, &self.options);

        for diagnostic in &outcome.diagnostics {
            tracing::warn!("Skipping malformed line from {}: {}", source, diagnostic);
        }

        let loaded = outcome.notes.len();
        self.cursor.replace_list(outcome.notes);

        tracing::info!(
            "Loaded {} notes from {} ({} lines rejected)",
            loaded,
            source,
            outcome.diagnostics.len()
        );

        LoadReport {
            source: source.to_string(),
            loaded,
            diagnostics: outcome.diagnostics,
            loaded_at: Utc::now(),
        }
    }

    /// Read text from `source` and load it.
    ///
    /// If the source cannot be read the cursor is left untouched.
    pub async fn load_from(&self, source: &NoteSource) -> Result<LoadReport, SourceError> {
        let raw = source.read_to_string().await?;
        Ok(self.load_text(&raw, &source.to_string()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_sample_notes()
    }
}
