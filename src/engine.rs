//! Platform date collaborators.
//!
//! Month and year arithmetic, leap-year rules and day differences are
//! computed by this crate. Exact day arithmetic, free-form text parsing and
//! pattern formatting go through a [`DateEngine`], and "today" comes from a
//! [`Clock`]. The defaults are backed by chrono.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};

use crate::{CalendarDate, DateError};

/// Day arithmetic, parsing and formatting delegated to a date library.
pub trait DateEngine {
    /// Adds `count` calendar days (negative counts go backwards).
    ///
    /// # Errors
    /// Returns `DateError` if the result is not a supported date.
    fn add_days(&self, date: CalendarDate, count: i64) -> Result<CalendarDate, DateError>;

    /// Parses free-form date text.
    ///
    /// # Errors
    /// Returns `DateError::InvalidText` carrying the parser's message.
    fn parse(&self, text: &str) -> Result<CalendarDate, DateError>;

    /// Formats `date` with a library-specific pattern.
    ///
    /// # Errors
    /// Returns `DateError::InvalidPattern` if the pattern cannot be applied.
    fn format(&self, date: CalendarDate, pattern: &str) -> Result<String, DateError>;
}

/// Source of the current date.
pub trait Clock: Send + Sync {
    /// Returns today's date
    fn today(&self) -> NaiveDate;
}

/// Reads the host clock in the local time zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    /// Creates a clock stuck on `date`
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

/// Strict form tried first; its error is the one reported on failure.
const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// chrono-backed [`DateEngine`].
///
/// Patterns use strftime specifiers (`%Y`, `%m`, `%d`, `%A`, `%B`, ...) and
/// are applied to the date at midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChronoEngine;

impl ChronoEngine {
    fn parse_naive(text: &str) -> Result<NaiveDate, chrono::ParseError> {
        let canonical = match NaiveDate::parse_from_str(text, CANONICAL_FORMAT) {
            Ok(date) => return Ok(date),
            Err(err) => err,
        };

        // Offsets are kept: the date is the one on the wall clock of that offset
        if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
            return Ok(datetime.date_naive());
        }
        if let Ok(datetime) = DateTime::parse_from_rfc2822(text) {
            return Ok(datetime.date_naive());
        }

        let datetime = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|datetime| datetime.date());
        let date = datetime.or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        });

        date.ok_or(canonical)
    }
}

impl DateEngine for ChronoEngine {
    fn add_days(&self, date: CalendarDate, count: i64) -> Result<CalendarDate, DateError> {
        let base = NaiveDate::try_from(date)?;
        let magnitude = Days::new(count.unsigned_abs());
        let shifted = if count < 0 {
            base.checked_sub_days(magnitude)
        } else {
            base.checked_add_days(magnitude)
        };

        let Some(shifted) = shifted else {
            tracing::debug!(%date, count, "day arithmetic overflowed the engine range");
            return Err(DateError::OutOfRange(format!("{date} {count:+} days")));
        };
        CalendarDate::try_from(shifted)
    }

    fn parse(&self, text: &str) -> Result<CalendarDate, DateError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        match Self::parse_naive(trimmed) {
            Ok(date) => CalendarDate::try_from(date),
            Err(err) => {
                tracing::debug!(
                    text = trimmed,
                    error = %err,
                    "date text matched no accepted format"
                );
                Err(DateError::InvalidText {
                    text: trimmed.to_owned(),
                    reason: err.to_string(),
                })
            }
        }
    }

    fn format(&self, date: CalendarDate, pattern: &str) -> Result<String, DateError> {
        let invalid = |reason: &str| {
            tracing::debug!(pattern, reason, "format pattern rejected");
            DateError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: reason.to_owned(),
            }
        };

        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(invalid("unrecognized format specifier"));
        }

        let midnight = NaiveDate::try_from(date)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| DateError::OutOfRange(date.to_string()))?;

        let mut out = String::new();
        write!(out, "{}", midnight.format_with_items(items.into_iter()))
            .map_err(|_| invalid("specifier needs a field a calendar date does not carry"))?;
        Ok(out)
    }
}
