//! Error type for the calendar_date crate.

use crate::consts::{MAX_DAY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR};
use std::convert::Infallible;

/// Error type for every fallible operation in the crate.
///
/// All variants describe invalid input: an out-of-range field, an
/// impossible day for its month, text no accepted format matches, an
/// unsupported creation argument or an unknown arithmetic unit. Failures
/// reported by a [`DateEngine`](crate::DateEngine) keep the engine's own
/// message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid year: {0} (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    InvalidYear(i64),

    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(i64),

    #[error("Invalid day: {0} (must be {min}-{max})", min = MIN_DAY, max = MAX_DAY)]
    InvalidDay(i64),

    #[error("Invalid day {day} for month {year}-{month:02}")]
    DayNotInMonth { year: i64, month: i64, day: i64 },

    #[error("Empty date string")]
    EmptyInput,

    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// Text rejected by the date engine's parser.
    #[error("Date string is invalid: {text:?}: {reason}")]
    InvalidText { text: String, reason: String },

    /// A dynamic creation argument of an unsupported shape.
    #[error("Unsupported date input: {0}")]
    UnsupportedInput(String),

    #[error("Invalid unit: {0:?} (expected year(s), month(s) or day(s))")]
    InvalidUnit(String),

    #[error("Invalid format pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Day arithmetic left the range the date engine can represent.
    #[error("Date arithmetic out of range: {0}")]
    OutOfRange(String),
}

impl DateError {
    /// Every variant is an invalid-input failure; there is no transient error.
    pub const fn is_invalid_input(&self) -> bool {
        true
    }
}

impl From<Infallible> for DateError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
