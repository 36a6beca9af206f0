use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LineDiagnostic;

/// Outcome of loading raw text into a session.
///
/// Malformed lines do not fail a load; they show up in `diagnostics` and the
/// valid lines are still installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    /// Where the text came from (a path, a URL, `stdin` or `inline`).
    pub source: String,
    /// Number of notes installed into the cursor.
    pub loaded: usize,
    pub diagnostics: Vec<LineDiagnostic>,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
