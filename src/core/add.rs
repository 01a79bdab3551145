use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::insert_record;
use crate::errors::{AppError, AppResult};
use crate::models::{Duration, SeizureRecord};
use crate::models::trigger::UNKNOWN_TRIGGER;
use crate::parser::datetime::extract_date_time;
use crate::parser::duration::find_duration;
use crate::parser::trigger::{capitalize_first, find_trigger};
use crate::utils::date::today;
use chrono::Datelike;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Build a record from loosely written command-line values.
    ///
    /// `when` goes through the same date/time extractor as imports; an
    /// explicit `duration` that cannot be read is an error here (unlike
    /// imports, the user asked for it). Without `--trigger` the trigger is
    /// looked up in the description, then falls back to the configured default.
    pub fn build(
        when: &str,
        duration: Option<&str>,
        trigger: Option<&str>,
        description: Option<&str>,
        cfg: &Config,
        default_year: i32,
    ) -> AppResult<SeizureRecord> {
        let hit = extract_date_time(when, default_year)
            .ok_or_else(|| AppError::InvalidDate(when.to_string()))?;

        let duration = match duration {
            Some(d) => find_duration(d)
                .or_else(|| d.trim().parse::<u32>().ok().map(|m| Duration::new(m, 0)))
                .ok_or_else(|| AppError::InvalidDuration(d.to_string()))?,
            None => Duration::default(),
        };

        let description = description.unwrap_or("").trim().to_string();

        let trigger = match trigger.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => capitalize_first(t),
            None => match find_trigger(&description) {
                Some(phrase) => capitalize_first(phrase),
                None if cfg.default_trigger.trim().is_empty() => UNKNOWN_TRIGGER.to_string(),
                None => cfg.default_trigger.clone(),
            },
        };

        Ok(SeizureRecord::new(hit.date_time, duration, trigger, description))
    }

    pub fn apply(
        pool: &mut DbPool,
        when: &str,
        duration: Option<&str>,
        trigger: Option<&str>,
        description: Option<&str>,
        cfg: &Config,
    ) -> AppResult<i64> {
        let rec = Self::build(when, duration, trigger, description, cfg, today().year())?;
        let id = insert_record(&pool.conn, &rec, "cli")?;

        ttlog_soft(
            &pool.conn,
            "add",
            &id.to_string(),
            &format!(
                "{} | {} | {}",
                rec.date_time_str(),
                rec.duration,
                rec.trigger
            ),
        );

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config {
            database: ":memory:".into(),
            ..Config::default()
        }
    }

    #[test]
    fn builds_from_loose_values() {
        let rec = AddLogic::build(
            "June 16, 2024 9pm",
            Some("1 min 30 sec"),
            None,
            Some("after eating dinner"),
            &cfg(),
            2025,
        )
        .unwrap();
        assert_eq!(rec.date_time_str(), "2024-06-16 21:00");
        assert_eq!(rec.duration, Duration::new(1, 30));
        assert_eq!(rec.trigger, "After eating");
    }

    #[test]
    fn plain_number_duration_is_minutes() {
        let rec = AddLogic::build("6/16/2024 21:00", Some("3"), Some("fever"), None, &cfg(), 2025)
            .unwrap();
        assert_eq!(rec.duration, Duration::new(3, 0));
        assert_eq!(rec.trigger, "Fever");
    }

    #[test]
    fn configured_default_trigger() {
        let mut c = cfg();
        c.default_trigger = "Not recorded".into();
        let rec = AddLogic::build("6/16/2024", None, None, None, &c, 2025).unwrap();
        assert_eq!(rec.trigger, "Not recorded");
        assert_eq!(rec.time_str(), "12:00");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            AddLogic::build("sometime", None, None, None, &cfg(), 2025),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            AddLogic::build("6/16/2024", Some("a while"), None, None, &cfg(), 2025),
            Err(AppError::InvalidDuration(_))
        ));
    }

    #[test]
    fn apply_persists_and_logs() {
        let mut pool = DbPool::in_memory().unwrap();
        let id = AddLogic::apply(&mut pool, "6/16/2024 9pm", None, None, None, &cfg()).unwrap();
        let stored = crate::db::queries::load_record(&pool.conn, id).unwrap().unwrap();
        assert_eq!(stored.source, "cli");

        let log = crate::db::log::load_log(&pool.conn).unwrap();
        assert!(log.iter().any(|e| e.operation == "add"));
    }
}
