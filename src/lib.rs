//! Pace note navigation for a rally co-driver.
//!
//! Raw delimited text goes through [`parser::parse`] and the resulting notes
//! are installed into a [`cursor::NoteCursor`], which presentation layers
//! step through and subscribe to.

pub mod api;
pub mod config;
pub mod cursor;
pub mod drive;
pub mod models;
pub mod parser;
pub mod session;
pub mod source;
