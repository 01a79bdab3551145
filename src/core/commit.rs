use crate::db::store::RecordStore;
use crate::models::SeizureRecord;
use serde::Serialize;

/// Result of committing a reviewed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub succeeded: usize,
    pub failed: usize,
    /// (description prefix, store error message), in input order.
    pub errors: Vec<(String, String)>,
    /// Ids assigned to the records that were stored.
    pub inserted_ids: Vec<i64>,
}

impl CommitOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

pub struct CommitDriver {
    /// Characters of the description kept when reporting a failed record.
    pub preview_len: usize,
}

impl Default for CommitDriver {
    fn default() -> Self {
        Self { preview_len: 40 }
    }
}

impl CommitDriver {
    pub fn new(preview_len: usize) -> Self {
        Self { preview_len }
    }

    /// Insert records one at a time, in order.
    ///
    /// A failing insert is recorded and the loop moves on; this never returns
    /// an error. The records are consumed: after this call the store owns
    /// whatever was persisted.
    pub fn commit<S: RecordStore + ?Sized>(
        &self,
        records: Vec<SeizureRecord>,
        store: &mut S,
    ) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();

        for rec in records {
            match store.insert(&rec) {
                Ok(id) => {
                    outcome.succeeded += 1;
                    outcome.inserted_ids.push(id);
                }
                Err(e) => {
                    outcome.failed += 1;
                    outcome.errors.push((
                        format!("{} {}", rec.date_time_str(), rec.description_prefix(self.preview_len)),
                        e.to_string(),
                    ));
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::db::store::SqliteStore;
    use crate::errors::{AppError, AppResult};
    use crate::models::{Duration, StoredRecord};
    use chrono::NaiveDate;

    /// Fails on the n-th insert call (1-based), records everything it sees.
    struct FlakyStore {
        fail_on: usize,
        calls: usize,
        seen: Vec<String>,
    }

    impl RecordStore for FlakyStore {
        fn insert(&mut self, record: &SeizureRecord) -> AppResult<i64> {
            self.calls += 1;
            self.seen.push(record.description.clone());
            if self.calls == self.fail_on {
                return Err(AppError::Store("disk full".into()));
            }
            Ok(self.calls as i64)
        }

        fn list(&self, _: Option<(NaiveDate, NaiveDate)>) -> AppResult<Vec<StoredRecord>> {
            Ok(Vec::new())
        }
    }

    fn records(n: usize) -> Vec<SeizureRecord> {
        (1..=n)
            .map(|i| {
                let dt = NaiveDate::from_ymd_opt(2024, 6, i as u32)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap();
                SeizureRecord::new(dt, Duration::default(), "Unknown", format!("entry number {i}"))
            })
            .collect()
    }

    #[test]
    fn failure_in_the_middle_does_not_stop_the_batch() {
        let mut store = FlakyStore {
            fail_on: 3,
            calls: 0,
            seen: Vec::new(),
        };
        let outcome = CommitDriver::default().commit(records(5), &mut store);

        assert_eq!(outcome.succeeded, 4);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.total(), 5);
        assert_eq!(store.calls, 5);
        assert_eq!(
            store.seen,
            vec!["entry number 1", "entry number 2", "entry number 3", "entry number 4", "entry number 5"]
        );
        assert_eq!(outcome.inserted_ids, vec![1, 2, 4, 5]);

        let (prefix, message) = &outcome.errors[0];
        assert!(prefix.contains("2024-06-03"));
        assert!(prefix.contains("entry number 3"));
        assert!(message.contains("disk full"));
    }

    #[test]
    fn long_descriptions_are_truncated_in_errors() {
        let mut store = FlakyStore {
            fail_on: 1,
            calls: 0,
            seen: Vec::new(),
        };
        let outcome = CommitDriver::new(5).commit(records(1), &mut store);
        assert_eq!(outcome.errors[0].0, "2024-06-01 12:00 entry…");
    }

    #[test]
    fn commits_into_sqlite() {
        let mut pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&mut pool, "import");
        let outcome = CommitDriver::default().commit(records(3), &mut store);
        assert_eq!(outcome.succeeded, 3);
        assert_eq!(store.list(None).unwrap().len(), 3);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&mut pool, "import");
        let outcome = CommitDriver::default().commit(Vec::new(), &mut store);
        assert_eq!(outcome, CommitOutcome::default());
    }
}
