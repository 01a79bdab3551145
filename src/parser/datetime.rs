//! Date/time extraction from free caregiver text.
//!
//! The extractor is a chain of independent matchers tried in a fixed priority
//! order; the first one that matches anywhere in the text wins:
//!
//! 1. numeric `M/D/Y`           (`6/18/24`, `12/25/2023 9:15pm`)
//! 2. month name first          (`June 16, 2024 9pm`, `Jun 20 around 3:30pm`)
//! 3. day first                 (`16 June 2024`, `3rd of March at 0830h`)
//! 4. ISO                       (`2024-06-16 21:00`)
//!
//! Each matcher may be followed by an optional time token. A date without a
//! time resolves to 12:00.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

/// Time used when a date has no recognisable time token.
pub const DEFAULT_TIME: (u32, u32) = (12, 0);

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|\
                      jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

const MONTH_ABBR: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Optional connector + time token appended to every date pattern.
const TIME_TAIL: &str = r"(?:\s*(?:,|-|–|@|~|at|around|about|approx\.?|approximately)?\s*(?P<time>(?:\d{1,2}:\d{2}(?:\s*[ap]\.?m\b\.?)?|\d{1,4}\s*[ap]\.?m\b\.?|\d{3,4}\s*(?:hrs|h)\b)(?:\s*\(ish\))?))?";

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?P<month>\d{{1,2}})/(?P<day>\d{{1,2}})/(?P<year>\d{{2,4}})\b{TIME_TAIL}"
    ))
    .unwrap()
});

/// Year after a month-name date. Two-digit years need a comma (`June 16, 24`).
const NAMED_YEAR: &str = r"(?:,?\s*(?P<year>\d{4})\b|,\s*(?P<short_year>\d{2})\b)?";
const NAMED_LONG_YEAR: &str = r"(?:,?\s*(?P<year>\d{4})\b)?";

fn month_first_pattern(year: &str) -> String {
    format!(
        r"(?i)\b(?P<month>{MONTHS})\b\.?\s+(?P<day>\d{{1,2}})(?:st|nd|rd|th)?\b{year}{TIME_TAIL}"
    )
}

fn day_first_pattern(year: &str) -> String {
    format!(
        r"(?i)\b(?P<day>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>{MONTHS})\b\.?{year}{TIME_TAIL}"
    )
}

static MONTH_FIRST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&month_first_pattern(NAMED_YEAR)).unwrap());
static MONTH_FIRST_LONG_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&month_first_pattern(NAMED_LONG_YEAR)).unwrap());

static DAY_FIRST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&day_first_pattern(NAMED_YEAR)).unwrap());
static DAY_FIRST_LONG_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&day_first_pattern(NAMED_LONG_YEAR)).unwrap());

/// Text after a two-digit number that makes it a time or a duration
/// (`June 16, 10 pm`, `June 16, 10:30`, `June 16, 30 sec`), not a year.
static SHORT_YEAR_GUARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?::|[ap]\.?m\b|(?:m|mins?|minutes?|s|secs?|seconds?|h|hrs?|hours?)\b)",
    )
    .unwrap()
});

static ISO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?P<year>\d{{4}})-(?P<month>\d{{1,2}})-(?P<day>\d{{1,2}})\b{TIME_TAIL}"
    ))
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthToken<'t> {
    Number(&'t str),
    Name(&'t str),
}

/// Raw pieces of a date/time expression, as found by one matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch<'t> {
    /// Byte range of the whole expression (date plus time token, if any).
    pub span: Range<usize>,
    pub year: Option<&'t str>,
    pub month: MonthToken<'t>,
    pub day: &'t str,
    pub time: Option<&'t str>,
}

/// A resolved timestamp plus where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeHit {
    pub date_time: NaiveDateTime,
    pub span: Range<usize>,
}

type Matcher = for<'t> fn(&'t str) -> Option<DateMatch<'t>>;

const MATCHERS: &[Matcher] = &[match_numeric, match_month_first, match_day_first, match_iso];

fn build_match<'t>(caps: &Captures<'t>, month: MonthToken<'t>) -> Option<DateMatch<'t>> {
    let whole = caps.get(0)?;
    Some(DateMatch {
        span: whole.start()..whole.end(),
        year: caps
            .name("year")
            .or_else(|| caps.name("short_year"))
            .map(|m| m.as_str()),
        month,
        day: caps.name("day")?.as_str(),
        time: caps.name("time").map(|m| m.as_str()),
    })
}

fn match_numeric(text: &str) -> Option<DateMatch<'_>> {
    let caps = NUMERIC_RE.captures(text)?;
    let month = MonthToken::Number(caps.name("month")?.as_str());
    build_match(&caps, month)
}

fn match_month_first(text: &str) -> Option<DateMatch<'_>> {
    match_month_name(text, &MONTH_FIRST_RE, &MONTH_FIRST_LONG_YEAR_RE)
}

fn match_day_first(text: &str) -> Option<DateMatch<'_>> {
    match_month_name(text, &DAY_FIRST_RE, &DAY_FIRST_LONG_YEAR_RE)
}

/// `regex` has no lookahead: a two-digit year followed by a time or
/// duration unit is retried with the four-digit-only pattern.
fn match_month_name<'t>(text: &'t str, re: &Regex, long_year_re: &Regex) -> Option<DateMatch<'t>> {
    let caps = re.captures(text)?;
    let caps = match caps.name("short_year") {
        Some(y) if SHORT_YEAR_GUARD_RE.is_match(&text[y.end()..]) => long_year_re.captures(text)?,
        _ => caps,
    };
    let month = MonthToken::Name(caps.name("month")?.as_str());
    build_match(&caps, month)
}

fn match_iso(text: &str) -> Option<DateMatch<'_>> {
    let caps = ISO_RE.captures(text)?;
    let month = MonthToken::Number(caps.name("month")?.as_str());
    build_match(&caps, month)
}

/// Run the matcher chain and return the first raw match.
pub fn find_date(text: &str) -> Option<DateMatch<'_>> {
    MATCHERS.iter().find_map(|matcher| matcher(text))
}

/// Find and resolve a timestamp in `text`.
///
/// Returns `None` when no pattern matches, or when the first matching
/// pattern describes an impossible calendar date or clock time.
pub fn extract_date_time(text: &str, default_year: i32) -> Option<DateTimeHit> {
    let m = find_date(text)?;
    let date_time = resolve(&m, default_year)?;
    Some(DateTimeHit {
        date_time,
        span: m.span,
    })
}

/// Copy of `text` with the matched date/time expression removed.
pub fn strip_date_time(text: &str) -> String {
    match find_date(text) {
        Some(m) => remove_span(text, m.span),
        None => text.to_string(),
    }
}

pub(crate) fn remove_span(text: &str, span: Range<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..span.start]);
    out.push(' ');
    out.push_str(&text[span.end..]);
    out
}

pub fn resolve(m: &DateMatch<'_>, default_year: i32) -> Option<NaiveDateTime> {
    let year = resolve_year(m.year, default_year)?;
    let month = match m.month {
        MonthToken::Number(n) => n.parse::<u32>().ok()?,
        // Unresolvable names fall back to January.
        MonthToken::Name(name) => month_from_name(name).unwrap_or(1),
    };
    let day = m.day.parse::<u32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let time = match m.time {
        Some(token) => resolve_time(token)?,
        None => NaiveTime::from_hms_opt(DEFAULT_TIME.0, DEFAULT_TIME.1, 0)?,
    };

    Some(date.and_time(time))
}

/// Absent → `default_year`; two digits → 2000 + value; otherwise literal.
pub fn resolve_year(token: Option<&str>, default_year: i32) -> Option<i32> {
    match token {
        None => Some(default_year),
        Some(t) => {
            let value = t.parse::<i32>().ok()?;
            if t.len() == 2 {
                Some(2000 + value)
            } else {
                Some(value)
            }
        }
    }
}

/// `"jan"`, `"January"`, `"Sept."` … → month number.
pub fn month_from_name(name: &str) -> Option<u32> {
    let folded = name.trim().trim_end_matches('.').to_lowercase();
    let prefix: String = folded.chars().take(3).collect();
    MONTH_ABBR
        .iter()
        .position(|abbr| *abbr == prefix)
        .map(|i| i as u32 + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Resolve a time token (`9pm`, `3:30 p.m.`, `930am`, `2130h`, `21:00`, `8pm(ish)`).
pub fn resolve_time(token: &str) -> Option<NaiveTime> {
    let lowered = token.trim().to_lowercase();
    let lowered = lowered
        .strip_suffix("(ish)")
        .map(str::trim_end)
        .unwrap_or(&lowered);

    let compact: String = lowered
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();

    let (digits, meridiem) = if let Some(d) = compact.strip_suffix("am") {
        (d, Some(Meridiem::Am))
    } else if let Some(d) = compact.strip_suffix("pm") {
        (d, Some(Meridiem::Pm))
    } else if let Some(d) = compact.strip_suffix("hrs") {
        (d, None)
    } else if let Some(d) = compact.strip_suffix('h') {
        (d, None)
    } else {
        (compact.as_str(), None)
    };

    let (mut hour, minute) = if let Some((h, m)) = digits.split_once(':') {
        (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?)
    } else {
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        match digits.len() {
            1 | 2 => (digits.parse::<u32>().ok()?, 0),
            3 => (digits[..1].parse::<u32>().ok()?, digits[1..].parse::<u32>().ok()?),
            4 => (digits[..2].parse::<u32>().ok()?, digits[2..].parse::<u32>().ok()?),
            _ => return None,
        }
    };

    match meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour += 12,
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
