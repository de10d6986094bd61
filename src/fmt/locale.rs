//! Locale resolution for month, weekday, and meridiem spellings.

use pure_rust_locales::{locale_match, Locale as PosixLocale};

/// The spellings one locale uses for month names, weekday names, and
/// AM/PM markers, as POSIX `LC_TIME` tables. Weekday tables start with
/// Sunday.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    pub(crate) months: &'static [&'static str],
    pub(crate) months_abbrev: &'static [&'static str],
    pub(crate) weekdays: &'static [&'static str],
    pub(crate) weekdays_abbrev: &'static [&'static str],
    pub(crate) am_pm: &'static [&'static str],
}

impl Locale {
    /// Resolves a locale by name.
    ///
    /// The empty string, `C`, and `POSIX` resolve to the portable locale;
    /// a codeset suffix (`en_US.UTF-8`) is ignored. Returns `None` for
    /// names with no locale data.
    pub fn resolve(name: &str) -> Option<Self> {
        let name = match name.split_once('.') {
            Some((base, _)) => base,
            None => name,
        };
        let posix = match name {
            "" | "C" | "POSIX" => PosixLocale::POSIX,
            name => PosixLocale::try_from(name).ok()?,
        };
        Some(Self::from_posix(posix))
    }

    fn from_posix(locale: PosixLocale) -> Self {
        Self {
            months: locale_match!(locale => LC_TIME::MON),
            months_abbrev: locale_match!(locale => LC_TIME::ABMON),
            weekdays: locale_match!(locale => LC_TIME::DAY),
            weekdays_abbrev: locale_match!(locale => LC_TIME::ABDAY),
            am_pm: locale_match!(locale => LC_TIME::AM_PM),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::from_posix(PosixLocale::POSIX)
    }
}
