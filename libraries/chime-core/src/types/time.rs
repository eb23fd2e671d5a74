/// Wall-clock time of day at minute resolution
use crate::error::ParseTimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hour and minute of a day (`00:00` to `23:59`)
///
/// Schedules are matched against this type by exact equality, so there is no
/// notion of seconds here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Midnight (`00:00`)
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Create a time of day, rejecting out-of-range components
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Build from minutes past midnight, wrapping at 24h
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % (24 * 60);
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    /// Hour component (0-23)
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59)
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight
    #[must_use]
    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    /// Parse `H:MM` / `HH:MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| ParseTimeError::Format(s.to_string()))?;

        let parse = |part: &str| -> Result<u8, ParseTimeError> {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseTimeError::Format(s.to_string()));
            }
            part.parse()
                .map_err(|_| ParseTimeError::Format(s.to_string()))
        };

        let (hour, minute) = (parse(hour)?, parse(minute)?);
        Self::new(hour, minute).ok_or(ParseTimeError::OutOfRange { hour, minute })
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
