use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid time of day {0:?}, expected HH:MM in 24-hour format")]
pub struct ParseTimeOfDayError(pub String);

/// A wall-clock time with minute precision, as used by DND bounds.
///
/// Serialized as an `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized_time =
            NaiveTime::from_hms_opt(inner.hour(), inner.minute(), 0).expect("Will never fail.");
        Self(normalized_time)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Local time-of-day of `instant` in its own time zone.
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::new(instant.time())
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Always in `[0, MINUTES_PER_DAY)`.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// `2:00 AM` style rendering for user-facing text.
    pub fn format_12h(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeOfDayError(s.to_owned());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(err)?;
        let is_number = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.chars().all(|c| c.is_ascii_digit())
        };

        if !is_number(hour, 2) || !is_number(minute, 2) || minute.len() != 2 {
            return Err(err());
        }

        let hour = hour.parse().map_err(|_| err())?;
        let minute = minute.parse().map_err(|_| err())?;

        Self::from_hm(hour, minute).ok_or_else(err)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeOfDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
