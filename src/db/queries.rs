use crate::errors::{AppError, AppResult};
use crate::models::{Duration, SeizureRecord, StoredRecord};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub const DATE_TIME_FMT: &str = "%Y-%m-%d %H:%M";

const SELECT_COLUMNS: &str =
    "SELECT id, date_time, duration_min, duration_sec, trigger, description, source, created_at
     FROM seizures";

pub fn map_row(row: &Row) -> Result<StoredRecord> {
    let dt_str: String = row.get("date_time")?;

    let date_time = NaiveDateTime::parse_from_str(&dt_str, DATE_TIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(dt_str.clone())),
        )
    })?;

    let duration = Duration::new(row.get("duration_min")?, row.get("duration_sec")?);

    Ok(StoredRecord {
        id: row.get("id")?,
        record: SeizureRecord {
            date_time,
            duration,
            trigger: row.get("trigger")?,
            description: row.get("description")?,
        },
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert one record and return the id assigned by SQLite.
pub fn insert_record(conn: &Connection, rec: &SeizureRecord, source: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO seizures (date_time, duration_min, duration_sec, trigger, description, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.date_time.format(DATE_TIME_FMT).to_string(),
            rec.duration.minutes,
            rec.duration.seconds,
            rec.trigger,
            rec.description,
            source,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All records, oldest first, optionally restricted to an inclusive date range.
pub fn load_records(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<StoredRecord>> {
    let mut out = Vec::new();

    match bounds {
        None => {
            let mut stmt =
                conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY date_time ASC, id ASC"))?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some((start, end)) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS}
                 WHERE substr(date_time, 1, 10) BETWEEN ?1 AND ?2
                 ORDER BY date_time ASC, id ASC"
            ))?;
            let rows = stmt.query_map(
                params![
                    start.format("%Y-%m-%d").to_string(),
                    end.format("%Y-%m-%d").to_string()
                ],
                map_row,
            )?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn load_record(conn: &Connection, id: i64) -> AppResult<Option<StoredRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn delete_record(conn: &Connection, id: i64) -> AppResult<()> {
    let affected = conn.execute("DELETE FROM seizures WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(AppError::RecordNotFound(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    fn rec(y: i32, m: u32, d: u32, trigger: &str) -> SeizureRecord {
        let dt = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();
        SeizureRecord::new(dt, Duration::new(2, 5), trigger, "test entry")
    }

    #[test]
    fn insert_and_read_back() {
        let pool = DbPool::in_memory().unwrap();
        let id = insert_record(&pool.conn, &rec(2024, 6, 16, "Woke up"), "import").unwrap();

        let stored = load_record(&pool.conn, id).unwrap().unwrap();
        assert_eq!(stored.record, rec(2024, 6, 16, "Woke up"));
        assert_eq!(stored.source, "import");
    }

    #[test]
    fn range_filter_is_inclusive() {
        let pool = DbPool::in_memory().unwrap();
        for (m, d) in [(5, 31), (6, 1), (6, 30), (7, 1)] {
            insert_record(&pool.conn, &rec(2024, m, d, "Fever"), "cli").unwrap();
        }

        let june = (
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        );
        let rows = load_records(&pool.conn, Some(june)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(load_records(&pool.conn, None).unwrap().len(), 4);
    }

    #[test]
    fn delete_missing_id_is_an_error() {
        let pool = DbPool::in_memory().unwrap();
        let id = insert_record(&pool.conn, &rec(2024, 6, 16, "Fever"), "cli").unwrap();
        delete_record(&pool.conn, id).unwrap();
        assert!(matches!(
            delete_record(&pool.conn, id),
            Err(AppError::RecordNotFound(_))
        ));
    }
}
