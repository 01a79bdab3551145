use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputFormat {
    /// Header row followed by one record per row.
    Csv,
    /// One record per non-empty line.
    FreeText,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "CSV"),
            InputFormat::FreeText => write!(f, "free text"),
        }
    }
}

/// Classify raw input. Never fails: anything that does not look like a
/// header-led table is free text.
///
/// A table needs at least two non-empty lines and a first line mentioning
/// `date` plus one of `time`, `duration`, `trigger`.
pub fn detect_format(text: &str) -> InputFormat {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let Some(first) = lines.next() else {
        return InputFormat::FreeText;
    };
    if lines.next().is_none() {
        return InputFormat::FreeText;
    }

    let header = first.to_lowercase();
    let has_companion = ["time", "duration", "trigger"]
        .iter()
        .any(|w| header.contains(w));

    if header.contains("date") && has_companion {
        InputFormat::Csv
    } else {
        InputFormat::FreeText
    }
}
