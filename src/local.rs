//! Broken-down wall-clock values with no zone attached.
//!
//! A [`LocalDateTime`] is ambiguous with respect to absolute time until it
//! is bound to a zone; binding lives in [`crate::zoned`].

use jiff::civil;
use jiff::Span;

use crate::error::{TimeError, TimeResult};

/// A Gregorian calendar date. Always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    pub year: i16,
    pub month: i8,
    pub day: i8,
}

impl CalendarDate {
    /// Creates a date, rejecting invalid month/day combinations.
    pub fn try_new(year: i16, month: i8, day: i8) -> TimeResult<Self> {
        civil::Date::new(year, month, day)
            .map(Self::from_civil)
            .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))
    }

    /// Normalizes a possibly out-of-range year/month/day combination into a
    /// valid date, carrying any overflow forward with exact calendar
    /// arithmetic. Returns the date together with a flag that is `true`
    /// when normalization changed the input.
    ///
    /// `(2024, 2, 30)` becomes March 1st 2024; `(2023, 13, 1)` becomes
    /// January 1st 2024; zero and negative components carry backwards.
    /// Fails only when the result leaves the supported calendar range,
    /// never on the overflow itself.
    pub fn normalized(year: i32, month: i32, day: i32) -> TimeResult<(Self, bool)> {
        if let (Ok(y), Ok(m), Ok(d)) = (
            i16::try_from(year),
            i8::try_from(month),
            i8::try_from(day),
        ) {
            if let Ok(date) = civil::Date::new(y, m, d) {
                return Ok((Self::from_civil(date), false));
            }
        }
        let year = i16::try_from(year).map_err(|_| {
            TimeError::invalid_argument()
                .with_message("year is outside the supported calendar range")
        })?;
        let base = civil::Date::new(year, 1, 1)
            .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))?;
        let carry = Span::new()
            .try_months(i64::from(month) - 1)
            .and_then(|span| span.try_days(i64::from(day) - 1))
            .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))?;
        let date = base.checked_add(carry).map_err(|_| {
            TimeError::invalid_argument()
                .with_message("date is outside the supported calendar range")
        })?;
        Ok((Self::from_civil(date), true))
    }

    pub(crate) fn from_civil(date: civil::Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub(crate) fn to_civil(self) -> TimeResult<civil::Date> {
        civil::Date::new(self.year, self.month, self.day)
            .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))
    }
}

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: i8,
    pub minute: i8,
    pub second: i8,
    /// Fractional second, 0..=999,999,999 nanoseconds.
    pub nanosecond: i32,
}

impl TimeOfDay {
    /// Creates a time of day, rejecting out-of-range components.
    pub fn try_new(hour: i8, minute: i8, second: i8, nanosecond: i32) -> TimeResult<Self> {
        civil::Time::new(hour, minute, second, nanosecond)
            .map(Self::from_civil)
            .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))
    }

    pub(crate) fn from_civil(time: civil::Time) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            nanosecond: time.subsec_nanosecond(),
        }
    }

    pub(crate) fn to_civil(self) -> TimeResult<civil::Time> {
        civil::Time::new(self.hour, self.minute, self.second, self.nanosecond)
            .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))
    }
}

/// A calendar date paired with a time of day: a wall-clock reading that is
/// not yet bound to any zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalDateTime {
    pub date: CalendarDate,
    pub time: TimeOfDay,
}

impl LocalDateTime {
    pub fn new(date: CalendarDate, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    pub(crate) fn from_civil(datetime: civil::DateTime) -> Self {
        Self {
            date: CalendarDate::from_civil(datetime.date()),
            time: TimeOfDay::from_civil(datetime.time()),
        }
    }

    pub(crate) fn to_civil(self) -> TimeResult<civil::DateTime> {
        Ok(civil::DateTime::from_parts(
            self.date.to_civil()?,
            self.time.to_civil()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarDate, TimeOfDay};
    use crate::error::ErrorKind;

    #[test]
    fn valid_dates_pass_through_unchanged() {
        let (date, normalized) = CalendarDate::normalized(2024, 2, 29).unwrap();
        assert!(!normalized);
        assert_eq!((date.year, date.month, date.day), (2024, 2, 29));
    }

    #[test]
    fn day_overflow_carries_into_the_next_month() {
        // Leap year: February has 29 days.
        let (date, normalized) = CalendarDate::normalized(2024, 2, 30).unwrap();
        assert!(normalized);
        assert_eq!((date.year, date.month, date.day), (2024, 3, 1));

        // Day 30 of a 28-day February is March 2nd.
        let (date, _) = CalendarDate::normalized(2023, 2, 30).unwrap();
        assert_eq!((date.year, date.month, date.day), (2023, 3, 2));
    }

    #[test]
    fn month_overflow_carries_into_the_next_year() {
        let (date, normalized) = CalendarDate::normalized(2023, 13, 1).unwrap();
        assert!(normalized);
        assert_eq!((date.year, date.month, date.day), (2024, 1, 1));
    }

    #[test]
    fn zero_components_carry_backwards() {
        let (date, _) = CalendarDate::normalized(2000, 0, 15).unwrap();
        assert_eq!((date.year, date.month, date.day), (1999, 12, 15));

        let (date, _) = CalendarDate::normalized(2024, 3, 0).unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 2, 29));
    }

    #[test]
    fn unrepresentable_years_are_rejected() {
        let err = CalendarDate::normalized(i32::MAX, 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn out_of_range_time_components_are_rejected() {
        assert!(TimeOfDay::try_new(24, 0, 0, 0).is_err());
        assert!(TimeOfDay::try_new(12, 60, 0, 0).is_err());
        assert!(TimeOfDay::try_new(12, 0, 0, 1_000_000_000).is_err());
    }
}
