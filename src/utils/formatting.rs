//! Formatting utilities used for CLI and export outputs.

use crate::models::Duration;

/// `2:05` style duration used in tables; zero shows as `--`.
pub fn duration_short(d: &Duration) -> String {
    if d.is_zero() {
        "--".to_string()
    } else {
        format!("{}:{:02}", d.minutes, d.seconds)
    }
}

/// Wrap long free text for table cells.
pub fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    textwrap::wrap(text, width.max(8))
        .into_iter()
        .map(|c| c.into_owned())
        .collect()
}

/// Parse a comma separated list of 1-based row numbers (`"2,5-7, 9"`).
/// On error the offending item is returned.
pub fn parse_row_list(s: &str) -> Result<Vec<usize>, String> {
    let mut rows = Vec::new();

    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let number = |t: &str| t.trim().parse::<usize>().map_err(|_| part.to_string());

        match part.split_once('-') {
            Some((a, b)) => {
                let (from, to) = (number(a)?, number(b)?);
                if from > to {
                    return Err(part.to_string());
                }
                rows.extend(from..=to);
            }
            None => rows.push(number(part)?),
        }
    }

    Ok(rows)
}
