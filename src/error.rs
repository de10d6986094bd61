//! The error type for all `zonetime` operations.
//!
//! Every public operation either returns its declared value or exactly one
//! [`TimeError`]; failures raised by the underlying calendar/timezone
//! library are translated at each operation boundary into one of the
//! [`ErrorKind`]s below, with a human readable message.

use core::fmt;
use std::borrow::Cow;

/// The `zonetime` result type.
pub type TimeResult<T> = Result<T, TimeError>;

/// The category of a [`TimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A zone name did not resolve, or its database entry was unreadable.
    ZoneNotFound,
    /// Text did not match a parse pattern, or a parsed field was out of
    /// range. Carries the byte position of the mismatch.
    Parse,
    /// A format pattern contained an unrecognized directive, or the locale
    /// did not resolve at format time.
    Format,
    /// An input was outside the domain of the operation (unknown unit or
    /// field name, value outside the supported range).
    InvalidArgument,
    /// An unanticipated failure in the underlying library.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoneNotFound => "zone not found",
            Self::Parse => "parse error",
            Self::Format => "format error",
            Self::InvalidArgument => "invalid argument",
            Self::Unknown => "unknown error",
        }
        .fmt(f)
    }
}

/// The error returned by `zonetime` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    position: Option<usize>,
}

impl TimeError {
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(""),
            position: None,
        }
    }

    /// Creates a `ZoneNotFound` error.
    pub const fn zone_not_found() -> Self {
        Self::new(ErrorKind::ZoneNotFound)
    }

    /// Creates a `Parse` error.
    pub const fn parse() -> Self {
        Self::new(ErrorKind::Parse)
    }

    /// Creates a `Format` error.
    pub const fn format() -> Self {
        Self::new(ErrorKind::Format)
    }

    /// Creates an `InvalidArgument` error.
    pub const fn invalid_argument() -> Self {
        Self::new(ErrorKind::InvalidArgument)
    }

    /// Creates an `Unknown` error.
    pub const fn unknown() -> Self {
        Self::new(ErrorKind::Unknown)
    }

    /// Attaches a message to the error.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches the byte position at which a parse failed.
    pub const fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns the error's kind.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error's message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte position of a parse failure, if any.
    pub const fn position(&self) -> Option<usize> {
        self.position
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(position) = self.position {
            write!(f, " (at byte {position})")?;
        }
        Ok(())
    }
}

impl std::error::Error for TimeError {}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, TimeError};

    #[test]
    fn display_carries_kind_message_and_position() {
        let err = TimeError::parse()
            .with_message("expected a month")
            .at(5);
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.position(), Some(5));
        assert_eq!(err.to_string(), "parse error: expected a month (at byte 5)");
    }

    #[test]
    fn display_without_message() {
        assert_eq!(TimeError::unknown().to_string(), "unknown error");
    }
}
