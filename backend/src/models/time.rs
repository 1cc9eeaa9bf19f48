use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Minutes in a day, the upper bound of the minutes-since-midnight axis.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Wall-clock time of day with minute precision.
///
/// Always rendered as zero-padded `HH:MM`; parsing accepts one or two
/// digits per field, so `"7:0"`, `"7:00"` and `"07:00"` are the same value.
/// `24:00` is accepted as the end of the day and sorts after `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

/// Error returned when a string is not a valid `H:M` time of day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("missing ':' separator in time '{0}'")]
    MissingSeparator(String),
    #[error("time field is not a 1-2 digit number in '{0}'")]
    InvalidField(String),
    #[error("hour {0} out of range 0-23 (24 only as 24:00)")]
    HourOutOfRange(u32),
    #[error("minute {0} out of range 0-59")]
    MinuteOutOfRange(u32),
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// End of the day, `24:00`. Only meaningful as an interval end.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay { hour: 24, minute: 0 };

    /// Create a time from hour and minute, validating both ranges.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour == 24 && minute == 0 {
            return Ok(Self::END_OF_DAY);
        }
        if hour > 23 {
            return Err(TimeParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeParseError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Build a time from minutes since midnight. Exactly 1440 is `24:00`;
    /// values past it wrap around.
    pub fn from_minutes(minutes: u32) -> Self {
        if minutes == MINUTES_PER_DAY {
            return Self::END_OF_DAY;
        }
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight (0..=1440).
    pub fn minutes(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Length of the outage window from `self` to `end`.
    ///
    /// An `end` earlier than `self` is read as crossing midnight, so
    /// `23:00 -> 02:00` lasts 180 minutes. Equal times give zero.
    pub fn minutes_until(&self, end: TimeOfDay) -> u32 {
        let (start, end) = (self.minutes(), end.minutes());
        if end >= start {
            end - start
        } else {
            MINUTES_PER_DAY - start + end
        }
    }
}

fn parse_field(field: &str, raw: &str) -> Result<u32, TimeParseError> {
    let field = field.trim();
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeParseError::InvalidField(raw.to_string()));
    }
    field
        .parse::<u32>()
        .map_err(|_| TimeParseError::InvalidField(raw.to_string()))
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TimeParseError::MissingSeparator(s.to_string()))?;
        TimeOfDay::new(parse_field(hour, s)?, parse_field(minute, s)?)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalize a loosely written time (`7:00`, `7:0`) to `HH:MM`.
///
/// Returns `None` when the input is not a valid time of day.
pub fn normalize_time(raw: &str) -> Option<String> {
    raw.parse::<TimeOfDay>().ok().map(|t| t.to_string())
}
