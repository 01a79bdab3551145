//! Duration extraction.
//!
//! Priority chain, first match wins:
//! 1. `<N> minute(s)` optionally followed by `<M> second(s)`
//! 2. `<N> second(s)`
//! 3. `<N>:<SS>` not followed by an am/pm marker
//!
//! No match is a normal outcome and yields a zero duration.

use crate::models::Duration;
use regex::Regex;
use std::sync::LazyLock;

static MIN_SEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<min>\d+(?:\.\d+)?)[\s-]*(?:minutes?|mins?)\b(?:\s*(?:and\s+)?(?P<sec>\d+)[\s-]*(?:seconds?|secs?)\b)?",
    )
    .unwrap()
});

static SEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?P<sec>\d+)[\s-]*(?:seconds?|secs?)\b").unwrap());

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<min>\d{1,3}):(?P<sec>\d{2})\b").unwrap());

type Matcher = fn(&str) -> Option<Duration>;

const MATCHERS: &[Matcher] = &[match_minutes_seconds, match_seconds, match_clock_pair];

/// Extract a duration, defaulting to zero when nothing is recognised.
pub fn extract_duration(text: &str) -> Duration {
    find_duration(text).unwrap_or_default()
}

/// Like [`extract_duration`] but tells "nothing found" apart from "0 seconds".
pub fn find_duration(text: &str) -> Option<Duration> {
    MATCHERS.iter().find_map(|matcher| matcher(text))
}

fn match_minutes_seconds(text: &str) -> Option<Duration> {
    let caps = MIN_SEC_RE.captures(text)?;
    let minutes = caps.name("min")?.as_str();
    let extra_seconds = match caps.name("sec") {
        Some(s) => s.as_str().parse::<u32>().ok()?,
        None => 0,
    };

    // "1.5 min" → 1m 30s
    let total = if let Some((whole, frac)) = minutes.split_once('.') {
        let whole: u32 = whole.parse().ok()?;
        let frac: f64 = format!("0.{}", frac).parse().ok()?;
        whole
            .checked_mul(60)?
            .checked_add((frac * 60.0).round() as u32)?
    } else {
        minutes.parse::<u32>().ok()?.checked_mul(60)?
    };

    Some(Duration::from_seconds(total.checked_add(extra_seconds)?))
}

fn match_seconds(text: &str) -> Option<Duration> {
    let caps = SEC_RE.captures(text)?;
    let seconds = caps.name("sec")?.as_str().parse::<u32>().ok()?;
    Some(Duration::from_seconds(seconds))
}

fn match_clock_pair(text: &str) -> Option<Duration> {
    CLOCK_RE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        if followed_by_meridiem(&text[whole.end()..]) {
            return None;
        }
        let minutes = caps.name("min")?.as_str().parse::<u32>().ok()?;
        let seconds = caps.name("sec")?.as_str().parse::<u32>().ok()?;
        Some(Duration::new(minutes, seconds))
    })
}

/// `3:39pm`, `3:39 PM`, `3:39 a.m.` are clock times, not durations.
fn followed_by_meridiem(rest: &str) -> bool {
    let rest = rest.trim_start().to_lowercase();
    ["am", "pm", "a.m", "p.m"]
        .iter()
        .any(|marker| rest.starts_with(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, s: u32) -> Duration {
        Duration::new(m, s)
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(extract_duration("- 1 minute 45 seconds, loud noise"), d(1, 45));
        assert_eq!(extract_duration("2 min seizure"), d(2, 0));
        assert_eq!(extract_duration("3 mins and 10 secs"), d(3, 10));
        assert_eq!(extract_duration("a 2-minute one"), d(2, 0));
    }

    #[test]
    fn seconds_alone() {
        assert_eq!(extract_duration("morning - 30 seconds, after eating"), d(0, 30));
        assert_eq!(extract_duration("about 90 sec"), d(1, 30));
    }

    #[test]
    fn fractional_minutes() {
        assert_eq!(extract_duration("lasted 1.5 minutes"), d(1, 30));
    }

    #[test]
    fn clock_pair_as_duration() {
        assert_eq!(extract_duration("lasted 2:15, then slept"), d(2, 15));
    }

    #[test]
    fn clock_time_is_not_a_duration() {
        assert_eq!(extract_duration("started at 3:39pm"), Duration::default());
        assert_eq!(extract_duration("started at 3:39 PM"), Duration::default());
        // a later, unguarded pair still counts
        assert_eq!(extract_duration("3:39pm, lasted 1:05"), d(1, 5));
    }

    #[test]
    fn unit_words_win_over_clock_pairs() {
        assert_eq!(extract_duration("2:15 then 40 seconds"), d(0, 40));
    }

    #[test]
    fn nothing_found_is_zero() {
        assert_eq!(extract_duration("woke up suddenly"), Duration::default());
        assert_eq!(find_duration("woke up suddenly"), None);
        assert_eq!(find_duration("0 seconds"), Some(Duration::default()));
    }
}
