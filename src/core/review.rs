//! Text rendering of a staged batch for human review, and of the commit tally.

use crate::core::commit::CommitOutcome;
use crate::models::trigger::{TriggerCategory, category_of};
use crate::models::{Duration, StoredRecord};
use crate::parser::{BatchResult, ParseFailure};
use crate::utils::formatting::{duration_short, wrap_cell};
use crate::utils::table::{Column, Table};

const DESC_WIDTH: usize = 44;

fn record_columns(first: &str) -> Vec<Column> {
    vec![
        Column::new(first, 3),
        Column::new("Date", 10),
        Column::new("Time", 5),
        Column::new("Dur.", 5),
        Column::new("Trigger", 14),
        Column::new("Description", DESC_WIDTH),
    ]
}

/// Numbered table of the staged records (numbers are the 1-based positions
/// accepted by `--exclude`).
pub fn render_batch(batch: &BatchResult) -> String {
    let mut table = Table::new(record_columns("#"));

    for (i, rec) in batch.records.iter().enumerate() {
        table.add_wrapped_row(vec![
            vec![(i + 1).to_string()],
            vec![rec.date_str()],
            vec![rec.time_str()],
            vec![duration_short(&rec.duration)],
            vec![rec.trigger.clone()],
            wrap_cell(&rec.description, DESC_WIDTH),
        ]);
    }

    table.render()
}

pub fn render_failures(failures: &[ParseFailure]) -> String {
    let mut table = Table::new(vec![
        Column::new("Line", 4),
        Column::new("Reason", 20),
        Column::new("Text", DESC_WIDTH),
    ]);

    for f in failures {
        table.add_wrapped_row(vec![
            vec![f.line_index.to_string()],
            vec![f.reason.to_string()],
            wrap_cell(&f.raw_text, DESC_WIDTH),
        ]);
    }

    table.render()
}

pub fn render_stored(records: &[StoredRecord], preview_len: usize) -> String {
    let mut table = Table::new(record_columns("ID"));

    for s in records {
        let r = &s.record;
        table.add_row(vec![
            s.id.to_string(),
            r.date_str(),
            r.time_str(),
            duration_short(&r.duration),
            r.trigger.clone(),
            r.description_prefix(preview_len),
        ]);
    }

    table.render()
}

/// Per-category count and total duration of stored records.
///
/// Triggers outside the vocabulary go under "Other"; missing or `Unknown`
/// triggers under "Unknown".
pub fn render_trigger_summary(records: &[StoredRecord]) -> String {
    const GROUPS: [TriggerCategory; 5] = [
        TriggerCategory::Activity,
        TriggerCategory::Rest,
        TriggerCategory::Food,
        TriggerCategory::Environment,
        TriggerCategory::Misc,
    ];

    let mut table = Table::new(vec![
        Column::new("Category", 20),
        Column::new("Count", 5),
        Column::new("Total", 8),
    ]);

    let mut push = |label: &str, matching: Vec<&StoredRecord>| {
        if matching.is_empty() {
            return;
        }
        let secs: u64 = matching.iter().map(|s| s.record.duration.total_seconds()).sum();
        let total = Duration::from_seconds(u32::try_from(secs).unwrap_or(u32::MAX));
        table.add_row(vec![
            label.to_string(),
            matching.len().to_string(),
            total.to_string(),
        ]);
    };

    for group in GROUPS {
        let matching = records
            .iter()
            .filter(|s| category_of(&s.record.trigger) == Some(group))
            .collect();
        push(group.label(), matching);
    }

    push(
        "Other",
        records
            .iter()
            .filter(|s| s.record.has_known_trigger() && category_of(&s.record.trigger).is_none())
            .collect(),
    );
    push(
        "Unknown",
        records
            .iter()
            .filter(|s| !s.record.has_known_trigger())
            .collect(),
    );

    table.render()
}

pub fn render_outcome(outcome: &CommitOutcome) -> String {
    let mut out = format!(
        "Committed {} of {} record(s), {} failed.\n",
        outcome.succeeded,
        outcome.total(),
        outcome.failed
    );
    for (prefix, message) in &outcome.errors {
        out.push_str(&format!("  - {} → {}\n", prefix, message));
    }
    out
}
