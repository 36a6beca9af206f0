use std::fmt;

use serde::{Deserialize, Serialize};

/// A single pace note read out by the co-driver.
///
/// A `radius` of `0` marks a feature that has no corner radius (a crest,
/// a jump) rather than an actual radius of zero. Neither the radius nor the
/// distance is range checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaceNote {
    pub radius: i32,
    /// Direction token such as `L`, `R` or a descriptive word like `Crest`.
    pub direction: String,
    /// Distance to the next note.
    pub distance: i32,
}

impl PaceNote {
    pub fn new(radius: i32, direction: impl Into<String>, distance: i32) -> Self {
        Self {
            radius,
            direction: direction.into(),
            distance,
        }
    }

    /// The text read aloud for this note.
    pub fn spoken_text(&self) -> String {
        self.distance.to_string()
    }

    /// Serialize back into the delimited line form accepted by the parser.
    pub fn to_line(&self, separator: char) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.radius,
            self.direction,
            self.distance,
            sep = separator
        )
    }
}

impl fmt::Display for PaceNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.radius, self.direction, self.distance)
    }
}

/// Snapshot of the navigation cursor.
///
/// `position`, `total` and `note` always come from the same cursor state, so a
/// presentation layer never sees a list swap without the matching position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    /// Index of the current note. `None` when the list is empty.
    pub position: Option<usize>,
    pub total: usize,
    pub note: Option<PaceNote>,
}

impl CursorSnapshot {
    pub fn empty() -> Self {
        Self {
            position: None,
            total: 0,
            note: None,
        }
    }

    /// Distance of the current note as text, or an empty string.
    pub fn spoken_text(&self) -> String {
        self.note
            .as_ref()
            .map(PaceNote::spoken_text)
            .unwrap_or_default()
    }
}
