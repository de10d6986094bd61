//! Extraction of calendar/time-of-day components from a zoned instant.

use crate::options::Field;
use crate::zoned::ZonedTime;

/// Every extractable component of a zoned instant, by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Components {
    pub year: i16,
    pub month: i8,
    pub day: i8,
    pub hour: i8,
    pub minute: i8,
    pub second: i8,
    /// Sub-second part of the local reading, as seconds in `[0, 1)`.
    pub sec_frac: f64,
    /// Day of week, 1 through 7 with Sunday = 1.
    pub wday: i8,
}

/// A single extracted component value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Fractional(f64),
    /// All components at once, for requests that name no field.
    Record(Components),
}

impl ZonedTime {
    /// Extracts every component of this instant's local reading.
    pub fn components(&self) -> Components {
        let datetime = self.civil();
        Components {
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            second: datetime.second(),
            // Offsets are whole seconds, so the civil fraction is the
            // instant's distance from its second floor; reading it here
            // keeps the [0, 1) bound inside DST folds, where re-binding
            // would select the other occurrence.
            sec_frac: f64::from(datetime.subsec_nanosecond()) / 1e9,
            wday: datetime.date().weekday().to_sunday_one_offset(),
        }
    }

    /// Extracts one component of this instant's local reading.
    pub fn field(&self, field: Field) -> FieldValue {
        let components = self.components();
        match field {
            Field::Year => FieldValue::Integer(i64::from(components.year)),
            Field::Month => FieldValue::Integer(i64::from(components.month)),
            Field::Day => FieldValue::Integer(i64::from(components.day)),
            Field::Hour => FieldValue::Integer(i64::from(components.hour)),
            Field::Minute => FieldValue::Integer(i64::from(components.minute)),
            Field::Second => FieldValue::Integer(i64::from(components.second)),
            Field::SecondFraction => FieldValue::Fractional(components.sec_frac),
            Field::Weekday => FieldValue::Integer(i64::from(components.wday)),
        }
    }
}
