use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Resolve a `--period` / `--range` expression into inclusive bounds.
///
/// Supports `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `start:end` ranges of the
/// same shape. `all` (or no value) means unbounded.
pub fn parse_period(p: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let Some(p) = p.map(str::trim) else {
        return Ok(None);
    };
    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start, end)) = p.split_once(':') {
        let (start, end) = (start.trim(), end.trim());
        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{p}: start and end must have the same format"
            )));
        }
        let (from, _) = single_period(start)?;
        let (_, to) = single_period(end)?;
        if from > to {
            return Err(AppError::InvalidDate(format!("{p}: start is after end")));
        }
        return Ok(Some((from, to)));
    }

    single_period(p).map(Some)
}

fn single_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((d1, last_day_of_month(d1.year(), d1.month()).ok_or_else(invalid)?))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}
