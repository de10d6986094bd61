//! `zonetime` converts between absolute instants, textual
//! representations, and broken-down calendar fields, resolving UTC
//! offsets and daylight-saving transitions through the IANA time zone
//! database.
//!
//! ```rust
//! use zonetime::{construct, format, Source, TimeFields};
//!
//! // Out-of-range calendar fields normalize instead of failing: day 30
//! // of February 2024 is March 1st.
//! let fields = TimeFields { year: 2024, month: 2, day: 30, ..Default::default() };
//! let instant = construct(Source::Fields(fields), Some("America/New_York"), None).unwrap();
//!
//! let text = format(instant, "%Y-%m-%d %H:%M:%S %Z", Some("America/New_York"), None).unwrap();
//! assert_eq!(text, "2024-03-01 00:00:00 EST");
//! ```
//!
//! The four operations — [`construct`], [`format`], [`floor`], and
//! [`get`] — run against the process-wide [`tzdb::global`] registry and
//! default to the `UTC` zone and the portable `C` locale. The typed API
//! underneath ([`ZonedTime`], [`TzdbRegistry`], [`fmt`], [`round`])
//! takes an explicit registry, so independent registries over different
//! database roots can coexist.
//!
//! Wall-clock readings that fall on a daylight-saving transition resolve
//! deterministically: a reading inside a gap (a local time that never
//! occurs) advances to the first valid instant at or after it, and a
//! reading inside an overlap (a local time that occurs twice) takes the
//! earlier of the two offsets.

#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::module_name_repetitions,
    // Narrowing casts below are all preceded by range checks.
    clippy::cast_possible_truncation
)]

pub mod error;
pub mod fields;
pub mod fmt;
pub mod local;
pub mod options;
pub mod round;
pub mod tzdb;
pub mod zoned;

mod instant;
mod sys;

#[doc(inline)]
pub use crate::error::{ErrorKind, TimeError, TimeResult};
pub use crate::fields::{Components, FieldValue};
pub use crate::fmt::Locale;
pub use crate::instant::Instant;
pub use crate::local::{CalendarDate, LocalDateTime, TimeOfDay};
pub use crate::options::{Field, Unit};
pub use crate::tzdb::TzdbRegistry;
pub use crate::zoned::{TimeFields, ZonedTime};

/// The zone used when an operation names none.
pub const DEFAULT_ZONE: &str = "UTC";
/// The locale used when an operation names none.
pub const DEFAULT_LOCALE: &str = "C";

/// The input accepted by [`construct`]: a textual reading with its parse
/// pattern, a record of raw field values, or the system clock.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Text { text: &'a str, pattern: &'a str },
    Fields(TimeFields),
    Now,
}

/// Constructs an instant from `source`, interpreted in `zone`.
///
/// Textual sources are parsed under `locale`. Defaults: zone `"UTC"`,
/// locale `"C"`.
pub fn construct(
    source: Source<'_>,
    zone: Option<&str>,
    locale: Option<&str>,
) -> TimeResult<Instant> {
    let registry = tzdb::global();
    let zone = zone.unwrap_or(DEFAULT_ZONE);
    let zoned = match source {
        Source::Text { text, pattern } => {
            let name = locale.unwrap_or(DEFAULT_LOCALE);
            let locale = Locale::resolve(name).ok_or_else(|| {
                TimeError::parse().with_message(format!("unresolved locale `{name}`"))
            })?;
            ZonedTime::from_text(text, pattern, &locale, zone, registry)?
        }
        Source::Fields(fields) => ZonedTime::from_fields(fields, zone, registry)?,
        Source::Now => ZonedTime::now(zone, registry)?,
    };
    Ok(zoned.instant())
}

/// Renders `instant` as text under `pattern`, in `zone` and `locale`.
pub fn format(
    instant: Instant,
    pattern: &str,
    zone: Option<&str>,
    locale: Option<&str>,
) -> TimeResult<String> {
    let registry = tzdb::global();
    let tz = registry.locate(zone.unwrap_or(DEFAULT_ZONE))?;
    let name = locale.unwrap_or(DEFAULT_LOCALE);
    let locale = Locale::resolve(name)
        .ok_or_else(|| TimeError::format().with_message(format!("unresolved locale `{name}`")))?;
    fmt::format(&ZonedTime::new(instant, tz), pattern, &locale)
}

/// Floors `instant` to a `unit` boundary in `zone`'s local time.
pub fn floor(instant: Instant, unit: Unit, zone: Option<&str>) -> TimeResult<Instant> {
    let tz = tzdb::global().locate(zone.unwrap_or(DEFAULT_ZONE))?;
    round::floor(instant, unit, &tz)
}

/// Extracts one component of `instant`'s local reading in `zone`, or the
/// whole component record when `field` is `None`.
pub fn get(instant: Instant, zone: Option<&str>, field: Option<Field>) -> TimeResult<FieldValue> {
    let tz = tzdb::global().locate(zone.unwrap_or(DEFAULT_ZONE))?;
    let zoned = ZonedTime::new(instant, tz);
    Ok(match field {
        Some(field) => zoned.field(field),
        None => FieldValue::Record(zoned.components()),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        construct, floor, format, get, ErrorKind, Field, FieldValue, Instant, Source, TimeFields,
        Unit,
    };

    const NS_PER_SEC: i64 = 1_000_000_000;

    fn fields(year: i32, month: i32, day: i32) -> TimeFields {
        TimeFields {
            year,
            month,
            day,
            ..TimeFields::default()
        }
    }

    #[test]
    fn construct_format_round_trips_to_the_second_floor() {
        let pattern = "%Y-%m-%dT%H:%M:%S";
        for (seconds, nanos, zone) in [
            (1_686_825_930, 123_456_789, "Asia/Kolkata"),
            (1_672_531_199, 999_999_999, "UTC"),
            // The second occurrence of 01:30 in a New York fold.
            (1_699_165_800, 250_000_000, "America/New_York"),
        ] {
            let instant = Instant::from_nanoseconds(seconds * NS_PER_SEC + nanos);
            let text = format(instant, pattern, Some(zone), None).unwrap();
            let reconstructed =
                construct(Source::Text { text: &text, pattern }, Some(zone), None).unwrap();
            assert_eq!(
                reconstructed,
                floor(instant, Unit::Second, Some(zone)).unwrap(),
                "{zone} {text}"
            );
        }
    }

    #[test]
    fn flooring_is_idempotent_across_units_and_zones() {
        let instant = Instant::from_nanoseconds(1_541_340_000 * NS_PER_SEC + 987_654_321);
        for zone in ["UTC", "Asia/Kolkata", "America/Sao_Paulo"] {
            for unit in [Unit::Day, Unit::Hour, Unit::Minute, Unit::Second] {
                let once = floor(instant, unit, Some(zone)).unwrap();
                assert_eq!(once, floor(once, unit, Some(zone)).unwrap());
            }
        }
    }

    #[test]
    fn extracted_tuples_are_monotone_in_instant_order() {
        let instants: Vec<Instant> = [0, 1, 60, 3600, 86_400, 1_699_165_800]
            .into_iter()
            .map(|s| Instant::from_nanoseconds(s * NS_PER_SEC))
            .collect();
        let mut previous = None;
        for instant in instants {
            let FieldValue::Record(c) = get(instant, Some("America/New_York"), None).unwrap()
            else {
                panic!("expected a record");
            };
            let tuple = (c.year, c.month, c.day, c.hour, c.minute, c.second);
            if let Some(previous) = previous {
                assert!(previous <= tuple);
            }
            previous = Some(tuple);
        }
    }

    #[test]
    fn the_first_of_january_2023_is_a_sunday() {
        let instant = construct(Source::Fields(fields(2023, 1, 1)), None, None).unwrap();
        assert_eq!(
            get(instant, Some("UTC"), Some(Field::Weekday)).unwrap(),
            FieldValue::Integer(1)
        );
    }

    #[test]
    fn calendar_overflow_constructs_the_carried_date() {
        let overflowed = construct(Source::Fields(fields(2024, 2, 30)), None, None).unwrap();
        let normalized = construct(Source::Fields(fields(2024, 3, 1)), None, None).unwrap();
        assert_eq!(overflowed, normalized);
    }

    #[test]
    fn hour_floors_follow_the_local_clock_in_half_hour_zones() {
        // 2023-06-15T10:45:00Z reads 16:15 in Kolkata (+05:30).
        let instant = Instant::from_nanoseconds(1_686_825_900 * NS_PER_SEC);
        let local_floor = floor(instant, Unit::Hour, Some("Asia/Kolkata")).unwrap();
        assert_eq!(
            local_floor,
            Instant::from_nanoseconds(1_686_825_000 * NS_PER_SEC)
        );

        let utc_aligned = Instant::from_nanoseconds(1_686_823_200 * NS_PER_SEC);
        assert_ne!(local_floor, utc_aligned);
    }

    #[test]
    fn unresolvable_zones_fail_with_zone_not_found() {
        let err = construct(Source::Now, Some("Not/AZone"), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZoneNotFound);
    }

    #[test]
    fn malformed_text_fails_with_a_positioned_parse_error() {
        let source = Source::Text {
            text: "not-a-date",
            pattern: "%Y-%m-%d",
        };
        let err = construct(source, None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.position().is_some());
    }

    #[test]
    fn the_component_record_agrees_with_single_field_reads() {
        let instant = Instant::from_nanoseconds(1_699_162_200 * NS_PER_SEC + 500_000_000);
        let zone = Some("America/New_York");
        let FieldValue::Record(record) = get(instant, zone, None).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(
            get(instant, zone, Some(Field::Hour)).unwrap(),
            FieldValue::Integer(i64::from(record.hour))
        );
        assert_eq!(
            get(instant, zone, Some(Field::SecondFraction)).unwrap(),
            FieldValue::Fractional(record.sec_frac)
        );
        assert_eq!(record.sec_frac, 0.5);
    }

    #[test]
    fn zone_and_locale_default_to_utc_and_c() {
        let instant = construct(Source::Fields(fields(2023, 1, 1)), None, None).unwrap();
        assert_eq!(instant, Instant::from_nanoseconds(1_672_531_200_000_000_000));
        assert_eq!(
            format(instant, "%Y-%m-%d %B %Z", None, None).unwrap(),
            "2023-01-01 January UTC"
        );
    }

    #[test]
    fn unknown_locales_are_reported_per_operation() {
        let instant = Instant::from_nanoseconds(0);
        let err = format(instant, "%B", None, Some("xx_XX")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let source = Source::Text {
            text: "2023-01-01",
            pattern: "%Y-%m-%d",
        };
        let err = construct(source, None, Some("xx_XX")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
