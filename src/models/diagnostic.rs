use std::fmt;

use serde::{Deserialize, Serialize};

/// The numeric field that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Radius,
    Distance,
}

impl NumericField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::Distance => "distance",
        }
    }
}

/// Why a line was rejected.
///
/// - `WrongFieldCount`: the line did not split into exactly three fields
/// - `NumberFormat`: the radius or distance was not an integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    WrongFieldCount { fields: usize },
    NumberFormat { field: NumericField },
}

/// A rejected input line. Returned by the parser, never logged by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiagnostic {
    /// 1-based line number within the input text.
    pub line_number: usize,
    /// The offending line as it appeared in the input.
    pub line: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl LineDiagnostic {
    pub fn is_wrong_field_count(&self) -> bool {
        matches!(self.kind, DiagnosticKind::WrongFieldCount { .. })
    }

    pub fn is_number_format(&self) -> bool {
        matches!(self.kind, DiagnosticKind::NumberFormat { .. })
    }
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::WrongFieldCount { fields } => write!(
                f,
                "line {}: expected 3 fields, found {}: {:?}",
                self.line_number, fields, self.line
            ),
            DiagnosticKind::NumberFormat { field } => write!(
                f,
                "line {}: {} is not an integer: {:?}",
                self.line_number,
                field.as_str(),
                self.line
            ),
        }
    }
}
