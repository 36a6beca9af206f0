//! Domain models for the rally co-driver.
//!
//! # Core Concepts
//!
//! - [`PaceNote`]: One route annotation (radius, direction, distance). Created
//!   by the parser and never mutated afterwards.
//! - [`LineDiagnostic`]: Why a specific input line was rejected during parsing.
//! - [`CursorSnapshot`]: A consistent view of the navigation cursor, as handed
//!   to presentation layers.
//! - [`LoadReport`]: Outcome of installing a freshly parsed list into a session.

mod diagnostic;
mod note;
mod report;

pub use diagnostic::*;
pub use note::*;
pub use report::*;
