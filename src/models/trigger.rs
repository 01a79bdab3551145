use serde::Serialize;

/// Sentinel stored when no known trigger phrase was found.
pub const UNKNOWN_TRIGGER: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerCategory {
    Activity,
    Rest,
    Food,
    Environment,
    Misc,
}

impl TriggerCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerCategory::Activity => "Movement / activity",
            TriggerCategory::Rest => "Rest / sleep",
            TriggerCategory::Food => "Food",
            TriggerCategory::Environment => "Environmental",
            TriggerCategory::Misc => "Miscellaneous",
        }
    }
}

/// Known trigger phrases, lowercase.
///
/// Order matters: when two phrases of the same length both match a line, the
/// one listed first wins.
pub const TRIGGER_VOCABULARY: &[(&str, TriggerCategory)] = &[
    // movement / activity
    ("exercise", TriggerCategory::Activity),
    ("running", TriggerCategory::Activity),
    ("playing", TriggerCategory::Activity),
    ("swimming", TriggerCategory::Activity),
    ("physical activity", TriggerCategory::Activity),
    ("overexertion", TriggerCategory::Activity),
    ("standing up", TriggerCategory::Activity),
    // rest / sleep
    ("woke up", TriggerCategory::Rest),
    ("waking up", TriggerCategory::Rest),
    ("falling asleep", TriggerCategory::Rest),
    ("asleep", TriggerCategory::Rest),
    ("sleeping", TriggerCategory::Rest),
    ("napping", TriggerCategory::Rest),
    ("lack of sleep", TriggerCategory::Rest),
    ("tired", TriggerCategory::Rest),
    ("fatigue", TriggerCategory::Rest),
    // food
    ("after eating", TriggerCategory::Food),
    ("missed meal", TriggerCategory::Food),
    ("skipped meal", TriggerCategory::Food),
    ("hungry", TriggerCategory::Food),
    ("after drinking", TriggerCategory::Food),
    // environmental
    ("loud noise", TriggerCategory::Environment),
    ("fireworks", TriggerCategory::Environment),
    ("flashing lights", TriggerCategory::Environment),
    ("bright light", TriggerCategory::Environment),
    ("hot weather", TriggerCategory::Environment),
    ("overheated", TriggerCategory::Environment),
    ("cold weather", TriggerCategory::Environment),
    // misc
    ("stress", TriggerCategory::Misc),
    ("anxiety", TriggerCategory::Misc),
    ("excitement", TriggerCategory::Misc),
    ("crying", TriggerCategory::Misc),
    ("fever", TriggerCategory::Misc),
    ("illness", TriggerCategory::Misc),
    ("missed medication", TriggerCategory::Misc),
    ("missed dose", TriggerCategory::Misc),
    ("screen time", TriggerCategory::Misc),
];

/// Category of a (case-insensitive) trigger phrase, if it is in the vocabulary.
pub fn category_of(trigger: &str) -> Option<TriggerCategory> {
    let folded = trigger.trim().to_lowercase();
    TRIGGER_VOCABULARY
        .iter()
        .find(|(phrase, _)| *phrase == folded)
        .map(|(_, cat)| *cat)
}
