use serde::Serialize;
use std::fmt;

/// Length of a seizure, minute/second resolution.
///
/// Seconds are always kept in `0..=59`; anything above is carried into
/// minutes at construction time. `Duration::default()` (0m 0s) is the value
/// used when no duration could be read, which is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Duration {
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes: minutes.saturating_add(seconds / 60),
            seconds: seconds % 60,
        }
    }

    pub fn from_seconds(total: u32) -> Self {
        Self::new(0, total)
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.minutes, self.seconds) {
            (0, 0) => write!(f, "--"),
            (m, 0) => write!(f, "{}m", m),
            (0, s) => write!(f, "{}s", s),
            (m, s) => write!(f, "{}m {:02}s", m, s),
        }
    }
}
