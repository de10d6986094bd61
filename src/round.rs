//! Truncation of instants to unit boundaries in local time.

use jiff::tz::TimeZone;

use crate::error::TimeResult;
use crate::instant::Instant;
use crate::options::Unit;
use crate::zoned::{bind_local, ZonedTime};

/// Floors an instant to a unit boundary in the zone's local time.
///
/// The instant's wall-clock reading under the zone is truncated (every
/// field finer than the unit is zeroed) and the truncated reading is bound
/// back to an instant with the usual gap/overlap policy. This is a
/// local-time floor, not integer division of the epoch count: in a zone
/// whose offset is not a whole number of the unit (a half-hour offset
/// zone, say) the result is not a UTC-aligned boundary, and a day floor
/// that lands in a midnight DST gap snaps forward to the transition.
pub fn floor(instant: Instant, unit: Unit, zone: &TimeZone) -> TimeResult<Instant> {
    let datetime = zone.to_datetime(instant.to_timestamp());
    let date = datetime.date();
    let truncated = match unit {
        Unit::Day => date.at(0, 0, 0, 0),
        Unit::Hour => date.at(datetime.hour(), 0, 0, 0),
        Unit::Minute => date.at(datetime.hour(), datetime.minute(), 0, 0),
        Unit::Second => date.at(datetime.hour(), datetime.minute(), datetime.second(), 0),
    };
    bind_local(zone, truncated)
}

impl ZonedTime {
    /// Floors this zoned time to a unit boundary in its own zone.
    pub fn floor(&self, unit: Unit) -> TimeResult<Self> {
        let instant = floor(self.instant(), unit, self.zone())?;
        Ok(Self::new(instant, self.zone().clone()))
    }
}
