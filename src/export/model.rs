// src/export/model.rs

use crate::models::StoredRecord;
use serde::Serialize;

/// CSV header, laid out so the importer maps every column back.
pub const CSV_HEADERS: [&str; 6] = [
    "Date",
    "Time",
    "Duration (min)",
    "Duration (sec)",
    "Trigger",
    "Description",
];

/// Flat view of a stored record for export.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RecordExport {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub duration_min: u32,
    pub duration_sec: u32,
    pub trigger: String,
    pub description: String,
    pub source: String,
}

impl From<&StoredRecord> for RecordExport {
    fn from(s: &StoredRecord) -> Self {
        let r = &s.record;
        Self {
            id: s.id,
            date: r.date_str(),
            time: r.time_str(),
            duration_min: r.duration.minutes,
            duration_sec: r.duration.seconds,
            trigger: r.trigger.clone(),
            description: r.description.clone(),
            source: s.source.clone(),
        }
    }
}

impl RecordExport {
    pub(crate) fn to_csv_row(&self) -> [String; 6] {
        [
            self.date.clone(),
            self.time.clone(),
            self.duration_min.to_string(),
            self.duration_sec.to_string(),
            self.trigger.clone(),
            self.description.clone(),
        ]
    }
}
