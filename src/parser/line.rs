use super::batch::{FailureReason, ParseFailure, RawLine};
use super::datetime::{extract_date_time, remove_span};
use super::duration::extract_duration;
use super::trigger::extract_trigger;
use crate::models::SeizureRecord;

/// Turn one free-text line into a record.
///
/// The date is mandatory. Duration is read from the line with the date/time
/// expression removed (so `9pm` or `3:30` never look like durations); the
/// trigger is read from the whole line. The description keeps the line
/// verbatim.
pub fn normalize_line(line: &RawLine, default_year: i32) -> Result<SeizureRecord, ParseFailure> {
    let Some(hit) = extract_date_time(&line.text, default_year) else {
        return Err(ParseFailure {
            line_index: line.index,
            raw_text: line.text.clone(),
            reason: FailureReason::DateTimeUnparseable,
        });
    };

    let stripped = remove_span(&line.text, hit.span);
    let duration = extract_duration(&stripped);
    let trigger = extract_trigger(&line.text);

    Ok(SeizureRecord::new(
        hit.date_time,
        duration,
        trigger,
        line.text.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Duration;
    use chrono::NaiveDate;

    fn raw(text: &str) -> RawLine {
        RawLine {
            text: text.to_string(),
            index: 1,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn evening_entry_with_minutes() {
        let line = "June 16, 2024 9pm - 2 min seizure, woke up suddenly";
        let rec = normalize_line(&raw(line), 2025).unwrap();
        assert_eq!(rec.date_time, at(2024, 6, 16, 21, 0));
        assert_eq!(rec.duration, Duration::new(2, 0));
        assert_eq!(rec.trigger, "Woke up");
        assert_eq!(rec.description, line);
    }

    #[test]
    fn numeric_date_without_time() {
        let rec = normalize_line(&raw("6/18/24 morning - 30 seconds, after eating"), 2025).unwrap();
        assert_eq!(rec.date_time, at(2024, 6, 18, 12, 0));
        assert_eq!(rec.duration, Duration::new(0, 30));
        assert_eq!(rec.trigger, "After eating");
    }

    #[test]
    fn clock_time_is_not_read_as_duration() {
        let rec = normalize_line(
            &raw("June 20 around 3:30pm - 1 minute 45 seconds, loud noise, fireworks"),
            2024,
        )
        .unwrap();
        assert_eq!(rec.date_time, at(2024, 6, 20, 15, 30));
        assert_eq!(rec.duration, Duration::new(1, 45));
        assert_eq!(rec.trigger, "Loud noise");
    }

    #[test]
    fn time_in_description_is_guarded() {
        let rec = normalize_line(&raw("12/25/23 - started 3:39pm, no idea why"), 2025).unwrap();
        assert_eq!(rec.date_time, at(2023, 12, 25, 12, 0));
        assert_eq!(rec.duration, Duration::default());
        assert_eq!(rec.trigger, "Unknown");
    }

    #[test]
    fn missing_date_is_rejected() {
        let line = RawLine {
            text: "short one after dinner".into(),
            index: 7,
        };
        let err = normalize_line(&line, 2025).unwrap_err();
        assert_eq!(err.line_index, 7);
        assert_eq!(err.reason, FailureReason::DateTimeUnparseable);
        assert_eq!(err.raw_text, "short one after dinner");
    }
}
