//! Unified application error type.
//! All modules (db, core, cli, parser, export) return AppError to keep the
//! error handling consistent and easy to manage.
//!
//! Note: a single unparseable line or a single failed insert during import is
//! *not* an AppError. Those outcomes are data (`ParseFailure`, `CommitOutcome`)
//! so that one bad row never aborts a whole batch.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("No record found with id {0}")]
    RecordNotFound(i64),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid row number: {0}")]
    InvalidRow(String),

    // ---------------------------
    // Import errors
    // ---------------------------
    #[error("Import error: {0}")]
    Import(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
