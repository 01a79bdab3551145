use super::duration::Duration;
use super::trigger::UNKNOWN_TRIGGER;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Canonical seizure record produced by the parser (or by `add`).
///
/// `date_time` is always a valid minute-precision local timestamp: a line that
/// cannot yield one never becomes a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeizureRecord {
    pub date_time: NaiveDateTime, // ⇔ seizures.date_time (TEXT "YYYY-MM-DD HH:MM")
    pub duration: Duration,       // ⇔ seizures.duration_min / duration_sec
    pub trigger: String,          // ⇔ seizures.trigger
    pub description: String,      // ⇔ seizures.description
}

impl SeizureRecord {
    pub fn new(
        date_time: NaiveDateTime,
        duration: Duration,
        trigger: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date_time: truncate_to_minute(date_time),
            duration,
            trigger: trigger.into(),
            description: description.into(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date_time.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.date_time.format("%H:%M").to_string()
    }

    pub fn date_time_str(&self) -> String {
        self.date_time.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn has_known_trigger(&self) -> bool {
        !self.trigger.is_empty() && self.trigger != UNKNOWN_TRIGGER
    }

    /// First `max_chars` characters of the description, with an ellipsis when cut.
    pub fn description_prefix(&self, max_chars: usize) -> String {
        let mut chars = self.description.chars();
        let prefix: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}…", prefix)
        } else {
            prefix
        }
    }
}

/// A record as read back from the store, with the identity the store assigned.
#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord {
    pub id: i64,
    pub record: SeizureRecord,
    pub source: String,     // ⇔ seizures.source ('cli' | 'import')
    pub created_at: String, // ⇔ seizures.created_at (ISO8601)
}

pub(crate) fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn description_prefix_marks_truncation() {
        let r = SeizureRecord::new(at(2024, 6, 16, 21, 0), Duration::default(), "Unknown", "woke up suddenly");
        assert_eq!(r.description_prefix(7), "woke up…");
        assert_eq!(r.description_prefix(50), "woke up suddenly");
    }

    #[test]
    fn seconds_are_dropped_from_timestamp() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 59)
            .unwrap();
        let r = SeizureRecord::new(dt, Duration::default(), "Unknown", "");
        assert_eq!(r.date_time_str(), "2024-01-02 03:04");
        assert!(!r.has_known_trigger());
    }
}
