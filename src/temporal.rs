//! Formatting and parsing of dates and date-times.
//!
//! Patterns use chrono's strftime syntax. Without a caller-supplied pattern:
//!
//! - dates render as `%Y-%m-%d` (`2020-05-14`)
//! - date-times render as `%Y-%m-%dT%H:%M:%S`, followed by fractional seconds only when
//!   they are non-zero and by `+HH:MM` only when the value carries an offset
//!   (`2020-06-11T14:32:00`, `2020-06-23T11:12:13+00:00`)
//!
//! Default date-time parsing accepts the `T`-separated form above with optional
//! fractional seconds, followed by an uppercase `Z`, a `±HH:MM` offset, or nothing.
//! A space separator or a lowercase `t`/`z` is rejected. Parsing with an explicit
//! pattern is exact.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt::{self, Write};
use thiserror::Error;

pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";
pub const DEFAULT_DATETIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DEFAULT_OFFSET_DATETIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Distinguishes date-only from date-time values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    Date,
    DateTime,
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalKind::Date => f.write_str("date"),
            TemporalKind::DateTime => f.write_str("datetime"),
        }
    }
}

/// A date-time that may or may not carry a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

/// A date or date-time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalValue {
    Date(NaiveDate),
    DateTime(Timestamp),
}

impl TemporalValue {
    #[must_use]
    pub const fn kind(&self) -> TemporalKind {
        match self {
            TemporalValue::Date(_) => TemporalKind::Date,
            TemporalValue::DateTime(_) => TemporalKind::DateTime,
        }
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalValue::Date(date) => write!(f, "{}", date),
            TemporalValue::DateTime(Timestamp::Naive(at)) => write!(f, "{}", at),
            TemporalValue::DateTime(Timestamp::Offset(at)) => write!(f, "{}", at),
        }
    }
}

/// Why a temporal value could not be formatted or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TemporalError {
    /// The pattern that was in effect, defaults included.
    pub pattern: String,
    pub reason: String,
}

impl TemporalError {
    fn new(pattern: &str, reason: impl fmt::Display) -> Self {
        TemporalError {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Returns `true` if every specifier in `pattern` is understood by chrono.
#[must_use]
pub fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Renders `value` with `pattern`, or with the default for its kind.
///
/// # Errors
///
/// Fails when the pattern asks for fields the value does not have, such as `%H` on a
/// date-only value.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use recmarshal::temporal::{format, TemporalValue, Timestamp};
///
/// let at = NaiveDate::from_ymd_opt(2020, 6, 11).unwrap().and_hms_opt(14, 32, 0).unwrap();
/// let value = TemporalValue::DateTime(Timestamp::Naive(at));
/// assert_eq!(format(&value, None).unwrap(), "2020-06-11T14:32:00");
/// assert_eq!(format(&value, Some("%d %b %Y %H:%M")).unwrap(), "11 Jun 2020 14:32");
/// ```
pub fn format(value: &TemporalValue, pattern: Option<&str>) -> Result<String, TemporalError> {
    let mut out = String::new();
    let (written, pattern) = match value {
        TemporalValue::Date(date) => {
            let pattern = pattern.unwrap_or(DEFAULT_DATE_PATTERN);
            (write!(out, "{}", date.format(pattern)), pattern)
        }
        TemporalValue::DateTime(Timestamp::Naive(at)) => {
            let pattern = pattern.unwrap_or(DEFAULT_DATETIME_PATTERN);
            (write!(out, "{}", at.format(pattern)), pattern)
        }
        TemporalValue::DateTime(Timestamp::Offset(at)) => {
            let pattern = pattern.unwrap_or(DEFAULT_OFFSET_DATETIME_PATTERN);
            (write!(out, "{}", at.format(pattern)), pattern)
        }
    };
    written.map_err(|_| {
        TemporalError::new(
            pattern,
            format_args!("pattern cannot be rendered for a {} value", value.kind()),
        )
    })?;
    Ok(out)
}

/// Parses `text` as a value of `kind`, with `pattern` or the default for the kind.
///
/// # Errors
///
/// Fails unless the whole of `text` matches the pattern.
///
/// # Examples
///
/// ```rust
/// use recmarshal::temporal::{parse, TemporalKind, TemporalValue};
///
/// let value = parse("2020-05-14", None, TemporalKind::Date).unwrap();
/// assert!(matches!(value, TemporalValue::Date(_)));
/// assert!(parse("2020-05-14 extra", None, TemporalKind::Date).is_err());
/// ```
pub fn parse(
    text: &str,
    pattern: Option<&str>,
    kind: TemporalKind,
) -> Result<TemporalValue, TemporalError> {
    match kind {
        TemporalKind::Date => {
            let pattern = pattern.unwrap_or(DEFAULT_DATE_PATTERN);
            NaiveDate::parse_from_str(text, pattern)
                .map(TemporalValue::Date)
                .map_err(|e| TemporalError::new(pattern, e))
        }
        TemporalKind::DateTime => parse_datetime(text, pattern).map(TemporalValue::DateTime),
    }
}

fn parse_datetime(text: &str, pattern: Option<&str>) -> Result<Timestamp, TemporalError> {
    match pattern {
        None => {
            // `Z` is the only zone designator besides a numeric offset.
            let offset = match text.strip_suffix('Z') {
                Some(local) => DateTime::parse_from_str(
                    &format!("{}+00:00", local),
                    DEFAULT_OFFSET_DATETIME_PATTERN,
                ),
                None => DateTime::parse_from_str(text, DEFAULT_OFFSET_DATETIME_PATTERN),
            };
            if let Ok(at) = offset {
                return Ok(Timestamp::Offset(at));
            }
            NaiveDateTime::parse_from_str(text, DEFAULT_DATETIME_PATTERN)
                .map(Timestamp::Naive)
                .map_err(|e| TemporalError::new(DEFAULT_DATETIME_PATTERN, e))
        }
        Some(pattern) => {
            // Patterns without an offset specifier never satisfy the offset-aware parser.
            if let Ok(at) = DateTime::parse_from_str(text, pattern) {
                return Ok(Timestamp::Offset(at));
            }
            NaiveDateTime::parse_from_str(text, pattern)
                .map(Timestamp::Naive)
                .map_err(|e| TemporalError::new(pattern, e))
        }
    }
}
