//! Trigger detection by longest vocabulary match.

use crate::models::trigger::{TRIGGER_VOCABULARY, UNKNOWN_TRIGGER};

/// Longest vocabulary phrase occurring in `line` (case-insensitive).
/// Ties keep the phrase listed first in the vocabulary.
pub fn find_trigger(line: &str) -> Option<&'static str> {
    let folded = line.to_lowercase();

    let mut best: Option<&'static str> = None;
    for &(phrase, _) in TRIGGER_VOCABULARY {
        if !folded.contains(phrase) {
            continue;
        }
        match best {
            Some(current) if current.len() >= phrase.len() => {}
            _ => best = Some(phrase),
        }
    }
    best
}

/// Trigger label for a line: matched phrase with its first letter upper-cased,
/// or `"Unknown"`.
pub fn extract_trigger(line: &str) -> String {
    match find_trigger(line) {
        Some(phrase) => capitalize_first(phrase),
        None => UNKNOWN_TRIGGER.to_string(),
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_match_is_capitalized() {
        assert_eq!(
            extract_trigger("June 16, 2024 9pm - 2 min seizure, woke up suddenly"),
            "Woke up"
        );
        assert_eq!(extract_trigger("6/18/24 morning - 30 seconds, AFTER EATING"), "After eating");
    }

    #[test]
    fn longest_phrase_wins() {
        // "loud noise" (10) beats "fireworks" (9)
        assert_eq!(
            extract_trigger("June 20 around 3:30pm - 1 minute 45 seconds, loud noise, fireworks"),
            "Loud noise"
        );
        // "falling asleep" beats "asleep"
        assert_eq!(extract_trigger("while falling asleep"), "Falling asleep");
    }

    #[test]
    fn equal_length_keeps_vocabulary_order() {
        // "exercise" and "sleeping" are both 8 chars; "exercise" is listed first
        assert_eq!(extract_trigger("sleeping after exercise"), "Exercise");
    }

    #[test]
    fn no_match_is_unknown() {
        assert_eq!(extract_trigger("nothing special today"), UNKNOWN_TRIGGER);
        assert_eq!(extract_trigger(""), UNKNOWN_TRIGGER);
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("élan"), "Élan");
    }
}
