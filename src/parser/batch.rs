//! Batch assembly: the reviewable result of parsing one import blob.

use super::csv::{ColumnMap, Delimiter, tokenize_header, tokenize_row};
use super::detect::{InputFormat, detect_format};
use super::line::normalize_line;
use crate::errors::{AppError, AppResult};
use crate::models::{Duration, SeizureRecord};
use crate::utils::date::today;
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// One unit of free-text input, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    DateTimeUnparseable,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::DateTimeUnparseable => write!(f, "no recognisable date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub line_index: usize,
    pub raw_text: String,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Year used when a date carries none.
    pub default_year: i32,
    /// Record dropped CSV rows in `failures` (free-text rejections are always recorded).
    pub report_row_failures: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_year: today().year(),
            report_row_failures: true,
        }
    }
}

/// Parsed records plus the lines that could not be parsed.
///
/// `records` is the staging area a reviewer edits before commit; the edit
/// helpers take 1-based positions as shown in the review table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub format: Option<InputFormat>,
    pub records: Vec<SeizureRecord>,
    pub failures: Vec<ParseFailure>,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn slot(&mut self, position: usize) -> AppResult<&mut SeizureRecord> {
        let len = self.records.len();
        position
            .checked_sub(1)
            .and_then(|i| self.records.get_mut(i))
            .ok_or_else(|| AppError::InvalidRow(format!("{} (batch has {} records)", position, len)))
    }

    pub fn set_date_time(&mut self, position: usize, date_time: NaiveDateTime) -> AppResult<()> {
        self.slot(position)?.date_time = crate::models::record::truncate_to_minute(date_time);
        Ok(())
    }

    pub fn set_duration(&mut self, position: usize, duration: Duration) -> AppResult<()> {
        self.slot(position)?.duration = duration;
        Ok(())
    }

    pub fn set_trigger(&mut self, position: usize, trigger: impl Into<String>) -> AppResult<()> {
        self.slot(position)?.trigger = trigger.into();
        Ok(())
    }

    pub fn set_description(
        &mut self,
        position: usize,
        description: impl Into<String>,
    ) -> AppResult<()> {
        self.slot(position)?.description = description.into();
        Ok(())
    }

    pub fn remove(&mut self, position: usize) -> AppResult<SeizureRecord> {
        self.slot(position)?;
        Ok(self.records.remove(position - 1))
    }

    /// Drop every record whose 1-based position is listed. Unknown positions
    /// are reported as an error and nothing is removed.
    pub fn retain_excluding(&mut self, positions: &[usize]) -> AppResult<()> {
        if let Some(bad) = positions
            .iter()
            .find(|p| **p == 0 || **p > self.records.len())
        {
            return Err(AppError::InvalidRow(format!(
                "{} (batch has {} records)",
                bad,
                self.records.len()
            )));
        }

        let mut position = 0;
        self.records.retain(|_| {
            position += 1;
            !positions.contains(&position)
        });
        Ok(())
    }

    /// Hand the staged records over for commit.
    pub fn into_records(self) -> Vec<SeizureRecord> {
        self.records
    }
}

/// Parse an import blob (pasted text or file contents).
///
/// Never fails: unparseable lines end up in `failures` and the rest of the
/// input is still processed.
pub fn parse_import(text: &str, opts: &ParseOptions) -> BatchResult {
    match detect_format(text) {
        InputFormat::Csv => parse_csv(text, opts),
        InputFormat::FreeText => parse_free_text(text, opts),
    }
}

/// Non-empty lines with their 1-based position in the input, untrimmed.
pub fn split_lines(text: &str) -> Vec<RawLine> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| RawLine {
            text: l.to_string(),
            index: i + 1,
        })
        .collect()
}

fn parse_free_text(text: &str, opts: &ParseOptions) -> BatchResult {
    let mut batch = BatchResult {
        format: Some(InputFormat::FreeText),
        ..Default::default()
    };

    for mut line in split_lines(text) {
        line.text = line.text.trim().to_string();
        match normalize_line(&line, opts.default_year) {
            Ok(rec) => batch.records.push(rec),
            Err(failure) => batch.failures.push(failure),
        }
    }

    batch
}

fn parse_csv(text: &str, opts: &ParseOptions) -> BatchResult {
    let mut batch = BatchResult {
        format: Some(InputFormat::Csv),
        ..Default::default()
    };

    let mut lines = split_lines(text).into_iter();
    let Some(header_line) = lines.next() else {
        return batch;
    };

    let delimiter = Delimiter::sniff(&header_line.text);
    let headers = tokenize_header(&header_line.text, delimiter);
    let columns = ColumnMap::from_header(&headers);

    for row_line in lines {
        let row = tokenize_row(&row_line.text, delimiter);
        match columns.to_record(&row, opts.default_year) {
            Some(rec) => batch.records.push(rec),
            None if opts.report_row_failures => batch.failures.push(ParseFailure {
                line_index: row_line.index,
                raw_text: row_line.text,
                reason: FailureReason::DateTimeUnparseable,
            }),
            None => {}
        }
    }

    batch
}
