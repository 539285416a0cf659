use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// The three countdown kinds shown as tabs in the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Focus, TimerMode::ShortBreak, TimerMode::LongBreak];

    /// Valid duration range in whole minutes.
    pub fn bounds(self) -> RangeInclusive<u32> {
        match self {
            TimerMode::Focus => 1..=180,
            TimerMode::ShortBreak | TimerMode::LongBreak => 1..=60,
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, TimerMode::Focus)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Clamp an arbitrary minute count into this mode's bounds.
    pub fn clamp_minutes(self, minutes: i64) -> u32 {
        let bounds = self.bounds();
        let (min, max) = (i64::from(*bounds.start()), i64::from(*bounds.end()));
        // Both ends fit in u32, so the cast cannot truncate.
        minutes.clamp(min, max) as u32
    }

    /// Clamp free-form user text into this mode's bounds.
    ///
    /// Text without a leading number falls back to the lower bound.
    pub fn clamp_input(self, input: &str) -> u32 {
        match parse_minutes(input) {
            Some(minutes) => self.clamp_minutes(minutes),
            None => *self.bounds().start(),
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timer mode '{0}' (expected focus, short or long)")]
pub struct UnknownMode(pub String);

impl FromStr for TimerMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "focus" | "pomodoro" | "pomo" => Ok(TimerMode::Focus),
            "short" | "short_break" => Ok(TimerMode::ShortBreak),
            "long" | "long_break" => Ok(TimerMode::LongBreak),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Read a leading integer the way a lenient form field does.
///
/// Leading whitespace and an optional sign are accepted; parsing stops at the
/// first non-digit. Returns `None` when no digit is present.
pub fn parse_minutes(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    seen.then(|| if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_bounds_are_wider_than_breaks() {
        assert_eq!(TimerMode::Focus.bounds(), 1..=180);
        assert_eq!(TimerMode::ShortBreak.bounds(), 1..=60);
        assert_eq!(TimerMode::LongBreak.bounds(), 1..=60);
    }

    #[test]
    fn clamp_minutes_hits_both_ends() {
        assert_eq!(TimerMode::Focus.clamp_minutes(500), 180);
        assert_eq!(TimerMode::Focus.clamp_minutes(0), 1);
        assert_eq!(TimerMode::ShortBreak.clamp_minutes(-7), 1);
        assert_eq!(TimerMode::LongBreak.clamp_minutes(61), 60);
        assert_eq!(TimerMode::LongBreak.clamp_minutes(20), 20);
    }

    #[test]
    fn parse_minutes_is_lenient() {
        assert_eq!(parse_minutes("25"), Some(25));
        assert_eq!(parse_minutes("  42min"), Some(42));
        assert_eq!(parse_minutes("-3"), Some(-3));
        assert_eq!(parse_minutes("+8"), Some(8));
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn clamp_input_falls_back_to_lower_bound() {
        assert_eq!(TimerMode::Focus.clamp_input("nope"), 1);
        assert_eq!(TimerMode::Focus.clamp_input("1000"), 180);
        assert_eq!(TimerMode::ShortBreak.clamp_input("12.5"), 12);
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!("focus".parse::<TimerMode>().unwrap(), TimerMode::Focus);
        assert_eq!("Pomodoro".parse::<TimerMode>().unwrap(), TimerMode::Focus);
        assert_eq!("short-break".parse::<TimerMode>().unwrap(), TimerMode::ShortBreak);
        assert_eq!("long".parse::<TimerMode>().unwrap(), TimerMode::LongBreak);
        assert!("lunch".parse::<TimerMode>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in TimerMode::ALL {
            assert_eq!(mode.to_string().parse::<TimerMode>().unwrap(), mode);
        }
    }
}
