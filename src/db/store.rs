//! The record store seen by the import pipeline.
//!
//! The ingestion code only ever *inserts*; listing is used by the outer
//! commands (`list`, `export`). Identity is always assigned by the store.

use crate::db::pool::DbPool;
use crate::db::queries::{insert_record, load_records};
use crate::errors::{AppError, AppResult};
use crate::models::{SeizureRecord, StoredRecord};
use chrono::NaiveDate;

pub trait RecordStore {
    /// Persist one record, returning the id the store assigned to it.
    fn insert(&mut self, record: &SeizureRecord) -> AppResult<i64>;

    /// Every stored record (optionally bounded by date), oldest first.
    fn list(&self, bounds: Option<(NaiveDate, NaiveDate)>) -> AppResult<Vec<StoredRecord>>;
}

/// SQLite-backed store. `source` tags every inserted row (`cli` or `import`).
pub struct SqliteStore<'p> {
    pool: &'p mut DbPool,
    source: &'static str,
}

impl<'p> SqliteStore<'p> {
    pub fn new(pool: &'p mut DbPool, source: &'static str) -> Self {
        Self { pool, source }
    }
}

impl RecordStore for SqliteStore<'_> {
    fn insert(&mut self, record: &SeizureRecord) -> AppResult<i64> {
        insert_record(&self.pool.conn, record, self.source).map_err(|e| match e {
            AppError::Db(db) => AppError::Store(db.to_string()),
            other => other,
        })
    }

    fn list(&self, bounds: Option<(NaiveDate, NaiveDate)>) -> AppResult<Vec<StoredRecord>> {
        load_records(&self.pool.conn, bounds)
    }
}
