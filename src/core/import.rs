use crate::config::Config;
use crate::core::commit::{CommitDriver, CommitOutcome};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::parser::{BatchResult, ParseOptions, parse_import};
use crate::utils::path::expand_tilde;
use std::fs;
use std::io::{self, Read};

/// High-level logic for the `import` command: stage, then commit.
pub struct ImportLogic;

impl ImportLogic {
    /// Read the import blob from a file, or from stdin when no file (or `-`) is given.
    pub fn read_input(file: Option<&str>) -> AppResult<String> {
        match file {
            Some(path) if path != "-" => {
                let p = expand_tilde(path);
                fs::read_to_string(&p).map_err(|e| {
                    AppError::Import(format!("cannot read {}: {}", p.display(), e))
                })
            }
            _ => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }

    /// Parse into a staged batch. Nothing is written.
    pub fn stage(text: &str, cfg: &Config, year: Option<i32>) -> BatchResult {
        let mut opts = ParseOptions {
            report_row_failures: cfg.report_row_failures,
            ..ParseOptions::default()
        };
        if let Some(y) = year {
            opts.default_year = y;
        }
        parse_import(text, &opts)
    }

    /// Commit a reviewed batch, one record at a time, and write an audit line.
    pub fn commit(pool: &mut DbPool, batch: BatchResult, cfg: &Config, origin: &str) -> CommitOutcome {
        let driver = CommitDriver::new(cfg.description_preview_len);

        let outcome = {
            let mut store = SqliteStore::new(pool, "import");
            driver.commit(batch.into_records(), &mut store)
        };

        ttlog_soft(
            &pool.conn,
            "import",
            origin,
            &format!(
                "Imported {} record(s), {} failed",
                outcome.succeeded, outcome.failed
            ),
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::load_records;

    fn cfg() -> Config {
        Config {
            database: ":memory:".into(),
            ..Config::default()
        }
    }

    #[test]
    fn stage_then_commit_with_exclusion() {
        let text = "Date,Time,Duration (min),Duration (sec),Trigger,Description\n\
                    6/16/2024,21:00,2,0,Woke up,woke up suddenly\n\
                    6/17/2024,08:00,0,40,Fever,hot\n\
                    6/18/2024,09:30,1,0,Stress,exam day\n";

        let mut batch = ImportLogic::stage(text, &cfg(), Some(2024));
        assert_eq!(batch.records.len(), 3);
        batch.retain_excluding(&[2]).unwrap();

        let mut pool = DbPool::in_memory().unwrap();
        let outcome = ImportLogic::commit(&mut pool, batch, &cfg(), "test.csv");
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 0);

        let stored = load_records(&pool.conn, None).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].record.trigger, "Woke up");
        assert_eq!(stored[1].record.trigger, "Stress");
        assert!(stored.iter().all(|s| s.source == "import"));

        let log = crate::db::log::load_log(&pool.conn).unwrap();
        assert!(log.iter().any(|e| e.operation == "import" && e.target == "test.csv"));
    }

    #[test]
    fn explicit_year_is_used_for_yearless_dates() {
        let batch = ImportLogic::stage("March 3 9am 30 sec\n", &cfg(), Some(2021));
        assert_eq!(batch.records[0].date_str(), "2021-03-03");
    }

    #[test]
    fn unreadable_file_is_an_import_error() {
        let err = ImportLogic::read_input(Some("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, AppError::Import(_)));
    }
}
