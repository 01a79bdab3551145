//! Ingestion engine: turns pasted caregiver notes or a CSV export into a
//! reviewable batch of canonical records.
//!
//! Everything in here is pure and synchronous; no I/O, no shared state.

pub mod batch;
pub mod csv;
pub mod datetime;
pub mod detect;
pub mod duration;
pub mod line;
pub mod trigger;

pub use batch::{BatchResult, FailureReason, ParseFailure, ParseOptions, RawLine, parse_import};
pub use detect::{InputFormat, detect_format};
