use jiff::Timestamp;

use crate::error::{TimeError, TimeResult};

/// An absolute point in time, counted as nanoseconds since
/// 1970-01-01T00:00:00 UTC.
///
/// The count is a full precision 64-bit integer; all arithmetic on it is
/// exact. Callers transporting instants through an `f64` keep exact
/// nanosecond resolution only up to 2^53 nanoseconds (about 104 days
/// either side of the epoch), so conversions to lossy numeric types
/// belong at the caller's boundary, never inside the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// Creates an `Instant` from a nanosecond count since the Unix epoch.
    pub const fn from_nanoseconds(nanoseconds: i64) -> Self {
        Self(nanoseconds)
    }

    /// Returns the nanosecond count since the Unix epoch.
    pub const fn as_nanoseconds(self) -> i64 {
        self.0
    }

    pub(crate) fn to_timestamp(self) -> Timestamp {
        // Every i64 nanosecond count (about +/-292 years) is inside the
        // library's +/-9999-year timestamp range.
        Timestamp::from_nanosecond(i128::from(self.0))
            .expect("an i64 nanosecond count is always a representable timestamp")
    }

    pub(crate) fn try_from_timestamp(timestamp: Timestamp) -> TimeResult<Self> {
        i64::try_from(timestamp.as_nanosecond())
            .map(Self)
            .map_err(|_| {
                TimeError::invalid_argument()
                    .with_message("instant exceeds the supported 64-bit nanosecond range")
            })
    }
}

impl From<i64> for Instant {
    fn from(nanoseconds: i64) -> Self {
        Self(nanoseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::Instant;

    #[test]
    fn ordered_by_nanosecond_count() {
        let earlier = Instant::from_nanoseconds(-1);
        let later = Instant::from_nanoseconds(1_000_000_000);
        assert!(earlier < later);
        assert_eq!(later.as_nanoseconds(), 1_000_000_000);
    }

    #[test]
    fn timestamp_round_trip_at_the_extremes() {
        for ns in [i64::MIN, -1, 0, 1, i64::MAX] {
            let instant = Instant::from_nanoseconds(ns);
            let back = Instant::try_from_timestamp(instant.to_timestamp()).unwrap();
            assert_eq!(back, instant);
        }
    }
}
