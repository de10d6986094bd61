//! User-facing option enums for the truncation and extraction operations.

use core::fmt;
use core::str::FromStr;

use crate::error::{TimeError, TimeResult};

/// The unit boundary a truncation floors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    Hour,
    Minute,
    Second,
}

impl FromStr for Unit {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        match s {
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            _ => Err(TimeError::invalid_argument()
                .with_message(format!("`{s}` is not a valid truncation unit"))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
        .fmt(f)
    }
}

/// A single extractable component of a zoned instant.
///
/// The string forms match the component names of the extraction operation:
/// `year`, `month`, `day`, `hour`, `min`, `sec`, `sec_frac`, `wday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    SecondFraction,
    Weekday,
}

impl FromStr for Field {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        match s {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "min" => Ok(Self::Minute),
            "sec" => Ok(Self::Second),
            "sec_frac" => Ok(Self::SecondFraction),
            "wday" => Ok(Self::Weekday),
            _ => Err(TimeError::invalid_argument()
                .with_message(format!("`{s}` is not a valid component name"))),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "min",
            Self::Second => "sec",
            Self::SecondFraction => "sec_frac",
            Self::Weekday => "wday",
        }
        .fmt(f)
    }
}
