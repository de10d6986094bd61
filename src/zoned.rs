//! An absolute instant paired with a resolved zone rule, and the binding
//! of wall-clock readings to absolute time.

use jiff::civil;
use jiff::tz::{AmbiguousOffset, Offset, TimeZone};
use jiff::{Span, Timestamp};

use crate::error::{TimeError, TimeResult};
use crate::fmt::Locale;
use crate::instant::Instant;
use crate::local::{CalendarDate, LocalDateTime};
use crate::tzdb::TzdbRegistry;

/// The raw field inputs for constructing a zoned time.
///
/// Absent fields are zero, matching the treatment of missing entries in a
/// field record. The calendar fields are normalized (overflow carries
/// forward); the time-of-day fields are added to local midnight of the
/// normalized date as exact durations, so `hour: 24` lands on the next
/// day rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeFields {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    /// Fractional second, in nanoseconds.
    pub nanosecond: i64,
}

/// An [`Instant`] bound to a resolved zone rule.
///
/// The instant is the single source of truth; every local representation
/// is derived from it on demand.
#[derive(Debug, Clone)]
pub struct ZonedTime {
    instant: Instant,
    zone: TimeZone,
}

impl ZonedTime {
    /// Pairs an instant with an already-resolved zone rule.
    pub fn new(instant: Instant, zone: TimeZone) -> Self {
        Self { instant, zone }
    }

    /// Constructs a zoned time from raw field values.
    ///
    /// Never fails on calendar overflow; see [`TimeFields`]. Fails with
    /// `ZoneNotFound` when the zone name does not resolve.
    pub fn from_fields(
        fields: TimeFields,
        zone: &str,
        registry: &TzdbRegistry,
    ) -> TimeResult<Self> {
        let zone = registry.locate(zone)?;
        let (date, _) = CalendarDate::normalized(fields.year, fields.month, fields.day)?;
        let midnight = civil::DateTime::from_parts(date.to_civil()?, civil::Time::midnight());
        let clock = Span::new()
            .try_hours(fields.hour)
            .and_then(|span| span.try_minutes(fields.minute))
            .and_then(|span| span.try_seconds(fields.second))
            .and_then(|span| span.try_nanoseconds(fields.nanosecond))
            .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))?;
        let datetime = midnight.checked_add(clock).map_err(|_| {
            TimeError::invalid_argument()
                .with_message("time-of-day fields move the date outside the supported range")
        })?;
        let instant = bind_local(&zone, datetime)?;
        Ok(Self { instant, zone })
    }

    /// Parses `text` against `pattern` under `locale` and binds the
    /// resulting wall-clock reading to the zone.
    pub fn from_text(
        text: &str,
        pattern: &str,
        locale: &Locale,
        zone: &str,
        registry: &TzdbRegistry,
    ) -> TimeResult<Self> {
        let zone = registry.locate(zone)?;
        let local = crate::fmt::parse(text, pattern, locale)?;
        let instant = bind_local(&zone, local.to_civil()?)?;
        Ok(Self { instant, zone })
    }

    /// Binds the current system clock reading to the zone.
    pub fn now(zone: &str, registry: &TzdbRegistry) -> TimeResult<Self> {
        Ok(Self {
            instant: crate::sys::system_instant()?,
            zone: registry.locate(zone)?,
        })
    }

    /// Returns the absolute instant.
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// Returns the resolved zone rule.
    pub fn zone(&self) -> &TimeZone {
        &self.zone
    }

    /// Derives the wall-clock reading of this instant in its zone.
    pub fn to_local(&self) -> LocalDateTime {
        LocalDateTime::from_civil(self.civil())
    }

    pub(crate) fn civil(&self) -> civil::DateTime {
        self.zone.to_datetime(self.instant.to_timestamp())
    }
}

/// Binds a wall-clock reading to a zone, resolving DST ambiguity with a
/// fixed policy: a reading inside a transition gap resolves to the first
/// valid instant at or after it (the transition itself), and a reading
/// inside an overlap resolves to the earlier of the two offsets.
pub(crate) fn bind_local(zone: &TimeZone, datetime: civil::DateTime) -> TimeResult<Instant> {
    let timestamp = match zone.to_ambiguous_timestamp(datetime).offset() {
        AmbiguousOffset::Unambiguous { offset } => resolve(offset, datetime)?,
        AmbiguousOffset::Fold { before, .. } => {
            log::trace!("local {datetime} occurs twice; taking the earlier offset {before}");
            resolve(before, datetime)?
        }
        AmbiguousOffset::Gap { before, after } => {
            log::trace!("local {datetime} never occurs; advancing to the end of the gap");
            // Converting with the post-gap offset lands strictly before
            // the transition, so the next transition from there is the
            // gap's end.
            let below = resolve(after, datetime)?;
            match zone.following(below).next() {
                Some(transition) => transition.timestamp(),
                // No transition data for the gap; shift past it instead.
                None => resolve(before, datetime)?,
            }
        }
    };
    Instant::try_from_timestamp(timestamp)
}

fn resolve(offset: Offset, datetime: civil::DateTime) -> TimeResult<Timestamp> {
    offset
        .to_timestamp(datetime)
        .map_err(|e| TimeError::invalid_argument().with_message(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{TimeFields, ZonedTime};
    use crate::error::ErrorKind;
    use crate::instant::Instant;
    use crate::tzdb::TzdbRegistry;

    fn fields(year: i32, month: i32, day: i32, hour: i64, minute: i64, second: i64) -> TimeFields {
        TimeFields {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond: 0,
        }
    }

    #[test]
    fn utc_fields_map_to_the_expected_epoch() {
        let registry = TzdbRegistry::new();
        let zoned =
            ZonedTime::from_fields(fields(2023, 1, 1, 0, 0, 0), "UTC", &registry).unwrap();
        assert_eq!(
            zoned.instant(),
            Instant::from_nanoseconds(1_672_531_200_000_000_000)
        );
    }

    #[test]
    fn calendar_overflow_normalizes_instead_of_failing() {
        let registry = TzdbRegistry::new();
        let overflowed =
            ZonedTime::from_fields(fields(2024, 2, 30, 0, 0, 0), "UTC", &registry).unwrap();
        let normalized =
            ZonedTime::from_fields(fields(2024, 3, 1, 0, 0, 0), "UTC", &registry).unwrap();
        assert_eq!(overflowed.instant(), normalized.instant());
    }

    #[test]
    fn hour_twenty_four_carries_into_the_next_day() {
        let registry = TzdbRegistry::new();
        let carried =
            ZonedTime::from_fields(fields(2023, 12, 31, 24, 0, 0), "UTC", &registry).unwrap();
        let next_day =
            ZonedTime::from_fields(fields(2024, 1, 1, 0, 0, 0), "UTC", &registry).unwrap();
        assert_eq!(carried.instant(), next_day.instant());
    }

    #[test]
    fn fold_readings_bind_to_the_earlier_offset() {
        let registry = TzdbRegistry::new();
        // 2023-11-05 01:30 in New York occurs at 05:30Z (EDT) and 06:30Z
        // (EST); the earlier offset wins.
        let zoned =
            ZonedTime::from_fields(fields(2023, 11, 5, 1, 30, 0), "America/New_York", &registry)
                .unwrap();
        assert_eq!(
            zoned.instant(),
            Instant::from_nanoseconds(1_699_162_200_000_000_000)
        );
    }

    #[test]
    fn gap_readings_advance_to_the_transition() {
        let registry = TzdbRegistry::new();
        // 2023-03-12 02:30 in New York never occurs; the first valid
        // instant at or after it is the 07:00Z transition.
        let zoned =
            ZonedTime::from_fields(fields(2023, 3, 12, 2, 30, 0), "America/New_York", &registry)
                .unwrap();
        assert_eq!(
            zoned.instant(),
            Instant::from_nanoseconds(1_678_604_400_000_000_000)
        );
    }

    #[test]
    fn parsed_gap_readings_advance_to_the_transition() {
        let registry = TzdbRegistry::new();
        let locale = crate::fmt::Locale::resolve("C").unwrap();
        let zoned = ZonedTime::from_text(
            "2023-03-12 02:30",
            "%Y-%m-%d %H:%M",
            &locale,
            "America/New_York",
            &registry,
        )
        .unwrap();
        assert_eq!(
            zoned.instant(),
            Instant::from_nanoseconds(1_678_604_400_000_000_000)
        );
    }

    #[test]
    fn unresolvable_zones_fail_with_zone_not_found() {
        let registry = TzdbRegistry::new();
        let err =
            ZonedTime::from_fields(TimeFields::default(), "Not/AZone", &registry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZoneNotFound);
    }

    #[test]
    fn local_representation_round_trips_through_the_zone() {
        let registry = TzdbRegistry::new();
        let zoned =
            ZonedTime::from_fields(fields(2023, 6, 15, 16, 15, 0), "Asia/Kolkata", &registry)
                .unwrap();
        let local = zoned.to_local();
        assert_eq!(
            (local.date.year, local.date.month, local.date.day),
            (2023, 6, 15)
        );
        assert_eq!(
            (local.time.hour, local.time.minute, local.time.second),
            (16, 15, 0)
        );
    }
}
