use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_record, load_record};
use crate::errors::{AppError, AppResult};
use crate::models::StoredRecord;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Look up a stored record so the caller can show it before deleting.
    pub fn find(pool: &mut DbPool, id: i64) -> AppResult<StoredRecord> {
        load_record(&pool.conn, id)?.ok_or(AppError::RecordNotFound(id))
    }

    /// Delete one record by id and return what was removed.
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<StoredRecord> {
        let existing = Self::find(pool, id)?;
        delete_record(&pool.conn, id)?;

        ttlog_soft(
            &pool.conn,
            "del",
            &id.to_string(),
            &format!(
                "{} | {}",
                existing.record.date_time_str(),
                existing.record.trigger
            ),
        );

        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::{insert_record, load_records};
    use crate::models::{Duration, SeizureRecord};
    use chrono::NaiveDate;

    #[test]
    fn deletes_existing_and_rejects_missing() {
        let mut pool = DbPool::in_memory().unwrap();
        let dt = NaiveDate::from_ymd_opt(2024, 6, 16)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();
        let id = insert_record(
            &pool.conn,
            &SeizureRecord::new(dt, Duration::new(1, 0), "Fever", "hot"),
            "cli",
        )
        .unwrap();

        let removed = DeleteLogic::apply(&mut pool, id).unwrap();
        assert_eq!(removed.record.trigger, "Fever");
        assert!(load_records(&pool.conn, None).unwrap().is_empty());

        assert!(matches!(
            DeleteLogic::apply(&mut pool, id),
            Err(AppError::RecordNotFound(_))
        ));
    }
}
