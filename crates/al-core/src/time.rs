//! Calendar dates and second-precision timestamps.
//!
//! Journal timestamps are local wall-clock times without a zone. A visit that
//! has not been logged out yet has no logout timestamp at all; see
//! [`format_clock`] for how that renders.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const CLOCK_FORMAT: &str = "%H:%M:%S";

/// A calendar day. Journals are partitioned by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Returns `None` for days that do not exist.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in local time.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: s.to_string(),
            })
    }
}

/// A point in time on a given day, with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Returns `None` if the time of day is out of range.
    #[must_use]
    pub fn new(date: Date, hour: u32, minute: u32, second: u32) -> Option<Self> {
        date.0.and_hms_opt(hour, minute, second).map(Self)
    }

    /// The current local time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Local::now().naive_local())
    }

    /// The calendar day this timestamp falls on.
    #[must_use]
    pub fn date(&self) -> Date {
        Date(self.0.date())
    }

    /// Time of day as `HH:MM:SS`.
    #[must_use]
    pub fn clock(&self) -> String {
        self.0.format(CLOCK_FORMAT).to_string()
    }

    /// Elapsed time from `earlier` to `self`; negative if `earlier` is later.
    #[must_use]
    pub fn duration_since(&self, earlier: Self) -> Duration {
        self.0 - earlier.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map(Self::from)
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: s.to_string(),
            })
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Renders a logout time for export: `HH:MM:SS`, or an empty string for a
/// visit that is still open.
#[must_use]
pub fn format_clock(timestamp: Option<&Timestamp>) -> String {
    timestamp.map(Timestamp::clock).unwrap_or_default()
}
