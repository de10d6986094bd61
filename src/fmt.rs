//! Pattern-driven parsing and rendering of wall-clock readings.
//!
//! Patterns are sequences of literal characters and `%`-prefixed
//! directives in the conventional strftime placeholder syntax. Parsing is
//! strict: the whole input must match the whole pattern, and any mismatch
//! reports the byte position in the input together with a reason.
//! Month, weekday, and AM/PM names are matched and rendered through the
//! [`Locale`] tables.

mod locale;

use core::ops::RangeInclusive;
use std::borrow::Cow;
use std::fmt::Write as _;

use jiff::civil;
use jiff::tz::{Offset, TimeZone};
use jiff::Timestamp;

use crate::error::{TimeError, TimeResult};
use crate::local::{CalendarDate, LocalDateTime, TimeOfDay};
use crate::zoned::ZonedTime;

pub use locale::Locale;

/// Parses `text` against `pattern`, producing the wall-clock reading the
/// text spells out.
///
/// The date fields (year, month, day) are required; time-of-day fields
/// default to zero. Values are validated strictly: out-of-range fields,
/// invalid month/day combinations, weekday names that contradict the
/// date, and unconsumed trailing input all fail.
pub fn parse(text: &str, pattern: &str, locale: &Locale) -> TimeResult<LocalDateTime> {
    let mut parser = Parser {
        input: text.as_bytes(),
        pos: 0,
        locale,
        fields: Collected::default(),
    };
    parser.walk(pattern.as_bytes())?;
    parser.finish()
}

/// Renders a zoned time as text under `pattern` and `locale`.
pub fn format(zoned: &ZonedTime, pattern: &str, locale: &Locale) -> TimeResult<String> {
    let timestamp = zoned.instant().to_timestamp();
    let mut formatter = Formatter {
        datetime: zoned.civil(),
        offset: zoned.zone().to_offset(timestamp),
        zone: zoned.zone(),
        timestamp,
        locale,
        out: String::with_capacity(pattern.len() + 8),
    };
    formatter.walk(pattern)?;
    Ok(formatter.out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

#[derive(Default)]
struct Collected {
    year: Option<i16>,
    month: Option<i8>,
    day: Option<i8>,
    day_pos: usize,
    hour: Option<i8>,
    hour12: Option<i8>,
    meridiem: Option<Meridiem>,
    minute: Option<i8>,
    second: Option<i8>,
    nanosecond: Option<i32>,
    /// Weekday index into the locale tables, 0 = Sunday.
    weekday: Option<usize>,
    weekday_pos: usize,
}

struct Parser<'i, 'l> {
    input: &'i [u8],
    pos: usize,
    locale: &'l Locale,
    fields: Collected,
}

impl Parser<'_, '_> {
    fn walk(&mut self, pattern: &[u8]) -> TimeResult<()> {
        let mut i = 0;
        while i < pattern.len() {
            let byte = pattern[i];
            if byte != b'%' {
                self.literal(byte)?;
                i += 1;
                continue;
            }
            let Some(&directive) = pattern.get(i + 1) else {
                return Err(self.err("dangling `%` at the end of the pattern"));
            };
            i += 2;
            match directive {
                b'%' => self.literal(b'%')?,
                b'n' | b't' => self.whitespace(),
                b'Y' => self.year()?,
                b'y' => self.year2()?,
                b'm' => self.month()?,
                b'b' | b'h' | b'B' => self.month_name()?,
                b'd' | b'e' => self.day()?,
                b'H' => self.hour()?,
                b'I' => self.hour12()?,
                b'p' => self.meridiem()?,
                b'M' => self.minute()?,
                b'S' => self.second()?,
                b'f' => self.fractional()?,
                b'a' | b'A' => self.weekday_name()?,
                b'D' => self.walk(b"%m/%d/%y")?,
                b'F' => self.walk(b"%Y-%m-%d")?,
                b'T' => self.walk(b"%H:%M:%S")?,
                b'R' => self.walk(b"%H:%M")?,
                _ => {
                    return Err(self.err(format!(
                        "directive `%{}` is not supported in parse patterns",
                        char::from(directive)
                    )));
                }
            }
        }
        Ok(())
    }

    fn err(&self, reason: impl Into<Cow<'static, str>>) -> TimeError {
        TimeError::parse().with_message(reason).at(self.pos)
    }

    fn advance(&mut self, count: usize) {
        self.input = &self.input[count..];
        self.pos += count;
    }

    fn literal(&mut self, byte: u8) -> TimeResult<()> {
        match self.input.first() {
            Some(&b) if b == byte => {
                self.advance(1);
                Ok(())
            }
            Some(_) => Err(self.err(format!("expected `{}`", char::from(byte)))),
            None => Err(self.err("unexpected end of input")),
        }
    }

    fn whitespace(&mut self) {
        let count = self
            .input
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.advance(count);
    }

    fn digits(&mut self, max: usize, what: &'static str) -> TimeResult<i64> {
        let count = self
            .input
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if count == 0 {
            return Err(self.err(format!("expected {what}")));
        }
        let mut value = 0i64;
        for &b in &self.input[..count] {
            value = value * 10 + i64::from(b - b'0');
        }
        self.advance(count);
        Ok(value)
    }

    fn ranged(
        &mut self,
        max: usize,
        range: RangeInclusive<i64>,
        what: &'static str,
    ) -> TimeResult<i64> {
        let start = self.pos;
        let value = self.digits(max, what)?;
        if !range.contains(&value) {
            return Err(TimeError::parse()
                .with_message(format!("{what} {value} is out of range"))
                .at(start));
        }
        Ok(value)
    }

    fn year(&mut self) -> TimeResult<()> {
        let sign = match self.input.first() {
            Some(b'-') => {
                self.advance(1);
                -1
            }
            Some(b'+') => {
                self.advance(1);
                1
            }
            _ => 1,
        };
        let value = self.digits(4, "a year")?;
        self.fields.year = Some((sign * value) as i16);
        Ok(())
    }

    fn year2(&mut self) -> TimeResult<()> {
        let value = self.ranged(2, 0..=99, "a two-digit year")?;
        // POSIX rule: 69-99 are the 1900s, 00-68 the 2000s.
        let century = if value >= 69 { 1900 } else { 2000 };
        self.fields.year = Some((century + value) as i16);
        Ok(())
    }

    fn month(&mut self) -> TimeResult<()> {
        self.fields.month = Some(self.ranged(2, 1..=12, "a month")? as i8);
        Ok(())
    }

    fn month_name(&mut self) -> TimeResult<()> {
        let tables = [self.locale.months, self.locale.months_abbrev];
        let index = self.name(&tables, "a month name")?;
        self.fields.month = Some(index as i8 + 1);
        Ok(())
    }

    fn day(&mut self) -> TimeResult<()> {
        self.fields.day_pos = self.pos;
        self.fields.day = Some(self.ranged(2, 1..=31, "a day of the month")? as i8);
        Ok(())
    }

    fn hour(&mut self) -> TimeResult<()> {
        self.fields.hour = Some(self.ranged(2, 0..=23, "an hour")? as i8);
        Ok(())
    }

    fn hour12(&mut self) -> TimeResult<()> {
        self.fields.hour12 = Some(self.ranged(2, 1..=12, "a twelve-hour clock hour")? as i8);
        Ok(())
    }

    fn meridiem(&mut self) -> TimeResult<()> {
        let index = self.name(&[self.locale.am_pm], "an AM/PM marker")?;
        self.fields.meridiem = Some(if index == 0 { Meridiem::Am } else { Meridiem::Pm });
        Ok(())
    }

    fn minute(&mut self) -> TimeResult<()> {
        self.fields.minute = Some(self.ranged(2, 0..=59, "a minute")? as i8);
        Ok(())
    }

    fn second(&mut self) -> TimeResult<()> {
        self.fields.second = Some(self.ranged(2, 0..=59, "a second")? as i8);
        Ok(())
    }

    fn fractional(&mut self) -> TimeResult<()> {
        let count = self
            .input
            .iter()
            .take(9)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if count == 0 {
            return Err(self.err("expected fractional second digits"));
        }
        let mut value = 0i64;
        for &b in &self.input[..count] {
            value = value * 10 + i64::from(b - b'0');
        }
        value *= 10i64.pow(9 - count as u32);
        self.advance(count);
        self.fields.nanosecond = Some(value as i32);
        Ok(())
    }

    fn weekday_name(&mut self) -> TimeResult<()> {
        self.fields.weekday_pos = self.pos;
        let tables = [self.locale.weekdays, self.locale.weekdays_abbrev];
        self.fields.weekday = Some(self.name(&tables, "a weekday name")?);
        Ok(())
    }

    /// Case-insensitive prefix match against the given name tables; the
    /// longest matching candidate wins so a full name is never cut short
    /// by its own abbreviation.
    fn name(
        &mut self,
        tables: &[&'static [&'static str]],
        what: &'static str,
    ) -> TimeResult<usize> {
        let mut best: Option<(usize, usize)> = None;
        for table in tables {
            for (index, candidate) in table.iter().enumerate() {
                let len = candidate.len();
                if len == 0 || self.input.len() < len {
                    continue;
                }
                if !self.input[..len].eq_ignore_ascii_case(candidate.as_bytes()) {
                    continue;
                }
                if best.is_none_or(|(best_len, _)| len > best_len) {
                    best = Some((len, index));
                }
            }
        }
        match best {
            Some((len, index)) => {
                self.advance(len);
                Ok(index)
            }
            None => Err(self.err(format!("expected {what}"))),
        }
    }

    fn finish(&self) -> TimeResult<LocalDateTime> {
        if !self.input.is_empty() {
            return Err(self.err("unconsumed input after the pattern was exhausted"));
        }
        let end = self.pos;
        let missing = |what: &str| {
            TimeError::parse()
                .with_message(format!("pattern did not supply {what}"))
                .at(end)
        };
        let year = self.fields.year.ok_or_else(|| missing("a year"))?;
        let month = self.fields.month.ok_or_else(|| missing("a month"))?;
        let day = self.fields.day.ok_or_else(|| missing("a day"))?;
        let date = civil::Date::new(year, month, day).map_err(|_| {
            TimeError::parse()
                .with_message(format!(
                    "{year:04}-{month:02}-{day:02} is not a valid calendar date"
                ))
                .at(self.fields.day_pos)
        })?;
        if let Some(weekday) = self.fields.weekday {
            if weekday != date.weekday().to_sunday_zero_offset() as usize {
                return Err(TimeError::parse()
                    .with_message("weekday name does not match the date")
                    .at(self.fields.weekday_pos));
            }
        }
        let hour = match (self.fields.hour, self.fields.hour12, self.fields.meridiem) {
            (Some(hour), _, _) => hour,
            (None, Some(hour), Some(Meridiem::Pm)) => (hour % 12) + 12,
            (None, Some(hour), Some(Meridiem::Am)) => hour % 12,
            // A twelve-hour value with no marker is taken literally.
            (None, Some(hour), None) => hour,
            (None, None, _) => 0,
        };
        let time = civil::Time::new(
            hour,
            self.fields.minute.unwrap_or(0),
            self.fields.second.unwrap_or(0),
            self.fields.nanosecond.unwrap_or(0),
        )
        .map_err(|e| TimeError::parse().with_message(e.to_string()).at(end))?;
        Ok(LocalDateTime::new(
            CalendarDate::from_civil(date),
            TimeOfDay::from_civil(time),
        ))
    }
}

struct Formatter<'a> {
    datetime: civil::DateTime,
    offset: Offset,
    zone: &'a TimeZone,
    timestamp: Timestamp,
    locale: &'a Locale,
    out: String,
}

impl Formatter<'_> {
    fn walk(&mut self, pattern: &str) -> TimeResult<()> {
        let bytes = pattern.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'%' {
                let start = i;
                while i < bytes.len() && bytes[i] != b'%' {
                    i += 1;
                }
                self.out.push_str(&pattern[start..i]);
                continue;
            }
            let Some(&directive) = bytes.get(i + 1) else {
                return Err(TimeError::format()
                    .with_message("dangling `%` at the end of the pattern"));
            };
            i += 2;
            match directive {
                b'%' => self.out.push('%'),
                b'n' => self.out.push('\n'),
                b't' => self.out.push('\t'),
                b'Y' => self.year(),
                b'y' => {
                    let _ = write!(self.out, "{:02}", i32::from(self.datetime.year()).rem_euclid(100));
                }
                b'C' => {
                    let _ = write!(self.out, "{:02}", i32::from(self.datetime.year()).div_euclid(100));
                }
                b'm' => {
                    let _ = write!(self.out, "{:02}", self.datetime.month());
                }
                b'd' => {
                    let _ = write!(self.out, "{:02}", self.datetime.day());
                }
                b'e' => {
                    let _ = write!(self.out, "{:>2}", self.datetime.day());
                }
                b'j' => {
                    let _ = write!(self.out, "{:03}", self.datetime.date().day_of_year());
                }
                b'H' => {
                    let _ = write!(self.out, "{:02}", self.datetime.hour());
                }
                b'I' => {
                    let hour = self.datetime.hour() % 12;
                    let _ = write!(self.out, "{:02}", if hour == 0 { 12 } else { hour });
                }
                b'p' => {
                    let index = usize::from(self.datetime.hour() >= 12);
                    self.out.push_str(self.locale.am_pm[index]);
                }
                b'M' => {
                    let _ = write!(self.out, "{:02}", self.datetime.minute());
                }
                b'S' => {
                    let _ = write!(self.out, "{:02}", self.datetime.second());
                }
                b'f' => {
                    let _ = write!(self.out, "{:09}", self.datetime.subsec_nanosecond());
                }
                b'a' => self.weekday_name(self.locale.weekdays_abbrev),
                b'A' => self.weekday_name(self.locale.weekdays),
                b'b' | b'h' => self.month_name(self.locale.months_abbrev),
                b'B' => self.month_name(self.locale.months),
                b'D' => self.walk("%m/%d/%y")?,
                b'F' => self.walk("%Y-%m-%d")?,
                b'T' => self.walk("%H:%M:%S")?,
                b'R' => self.walk("%H:%M")?,
                b'z' => self.utc_offset(false),
                b':' => {
                    if bytes.get(i) == Some(&b'z') {
                        i += 1;
                        self.utc_offset(true);
                    } else {
                        return Err(TimeError::format()
                            .with_message("`%:` must be followed by `z` in format patterns"));
                    }
                }
                b'Z' => {
                    let info = self.zone.to_offset_info(self.timestamp);
                    let _ = write!(self.out, "{}", info.abbreviation());
                }
                _ => {
                    return Err(TimeError::format().with_message(format!(
                        "unrecognized directive `%{}` in format pattern",
                        char::from(directive)
                    )));
                }
            }
        }
        Ok(())
    }

    fn year(&mut self) {
        let year = i32::from(self.datetime.year());
        if year < 0 {
            let _ = write!(self.out, "-{:04}", -year);
        } else {
            let _ = write!(self.out, "{year:04}");
        }
    }

    fn weekday_name(&mut self, table: &'static [&'static str]) {
        let index = self.datetime.date().weekday().to_sunday_zero_offset() as usize;
        self.out.push_str(table[index]);
    }

    fn month_name(&mut self, table: &'static [&'static str]) {
        self.out.push_str(table[self.datetime.month() as usize - 1]);
    }

    fn utc_offset(&mut self, colon: bool) {
        let seconds = self.offset.seconds();
        let sign = if seconds < 0 { '-' } else { '+' };
        let abs = seconds.abs();
        let (hours, minutes) = (abs / 3600, (abs % 3600) / 60);
        if colon {
            let _ = write!(self.out, "{sign}{hours:02}:{minutes:02}");
        } else {
            let _ = write!(self.out, "{sign}{hours:02}{minutes:02}");
        }
    }
}
