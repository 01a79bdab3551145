//! Tabular import: row tokenizer and loose header → column mapping.
//!
//! The format is a small RFC4180 subset: comma or tab separated, `"`-quoted
//! fields with `""` escapes in comma mode, one record per physical line.

use super::datetime::{extract_date_time, resolve_time};
use super::duration::find_duration;
use crate::models::{Duration, SeizureRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Tab if the header line contains one, comma otherwise.
    pub fn sniff(header_line: &str) -> Self {
        if header_line.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Split one row into fields.
pub fn tokenize_row(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Tab => line.split(delimiter.as_char()).map(str::to_string).collect(),
        Delimiter::Comma => tokenize_quoted(line, ','),
    }
}

/// Header row: same tokenization, case-folded.
pub fn tokenize_header(line: &str, delimiter: Delimiter) -> Vec<String> {
    tokenize_row(line, delimiter)
        .into_iter()
        .map(|h| h.trim().to_lowercase())
        .collect()
}

fn tokenize_quoted(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => fields.push(emit_field(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(emit_field(&mut current));

    fields
}

fn emit_field(buf: &mut String) -> String {
    let field = buf.trim().to_string();
    buf.clear();
    field
}

/// Indices of the canonical columns in a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub time: Option<usize>,
    pub minutes: Option<usize>,
    pub seconds: Option<usize>,
    pub trigger: Option<usize>,
    pub description: Option<usize>,
    /// Free-form duration column, only consulted when there are no
    /// minute/second columns.
    pub duration: Option<usize>,
}

impl ColumnMap {
    /// Map case-folded header tokens by substring, first match wins.
    pub fn from_header(headers: &[String]) -> Self {
        let find = |needle: &str| headers.iter().position(|h| h.contains(needle));
        Self {
            date: find("date"),
            time: find("time"),
            minutes: find("min"),
            seconds: find("sec"),
            trigger: find("trigger"),
            description: find("desc"),
            duration: find("duration"),
        }
    }

    /// Raw (trimmed) value of a column, `""` when the column or the cell is missing.
    pub fn field<'r>(&self, row: &'r [String], idx: Option<usize>) -> &'r str {
        idx.and_then(|i| row.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    fn number(&self, row: &[String], idx: Option<usize>) -> u32 {
        self.field(row, idx).parse::<u32>().unwrap_or(0)
    }

    fn duration(&self, row: &[String]) -> Duration {
        if self.minutes.is_some() || self.seconds.is_some() {
            return Duration::new(
                self.number(row, self.minutes),
                self.number(row, self.seconds),
            );
        }

        let raw = self.field(row, self.duration);
        if let Ok(minutes) = raw.parse::<u32>() {
            return Duration::new(minutes, 0);
        }
        find_duration(raw).unwrap_or_default()
    }

    /// Build a record from one tokenized row.
    ///
    /// A non-empty time cell is read as a time token on its own (`21`,
    /// `2130`, `9:15 PM`) and replaces any time found in the date cell.
    /// Returns `None` when the date cell has no valid date or the time cell
    /// is filled but unreadable.
    pub fn to_record(&self, row: &[String], default_year: i32) -> Option<SeizureRecord> {
        let hit = extract_date_time(self.field(row, self.date), default_year)?;

        let time_cell = match self.time {
            // a single "Date/Time" column maps to both
            idx if idx == self.date => "",
            idx => self.field(row, idx),
        };
        let date_time = if time_cell.is_empty() {
            hit.date_time
        } else {
            hit.date_time.date().and_time(resolve_time(time_cell)?)
        };

        Some(SeizureRecord::new(
            date_time,
            self.duration(row),
            self.field(row, self.trigger),
            self.field(row, self.description),
        ))
    }
}
