//! Input shapes accepted by [`CalendarDate::create`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};

use crate::{CalendarDate, Clock, DateEngine, DateError};

/// A value [`CalendarDate::create`] can turn into a date.
///
/// The variant is normally picked at compile time through the `From` impls.
/// `DateInput::try_from(&serde_json::Value)` covers callers holding a
/// dynamically typed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// The clock's current date
    Now,
    /// Year, month and day, validated on resolution
    Ymd(i64, i64, i64),
    /// Date text for the engine's parser
    Text(String),
    /// A date from the platform date library
    Platform(NaiveDate),
    /// An existing date, returned unchanged
    Existing(CalendarDate),
}

impl DateInput {
    /// Resolves this input into a validated date.
    ///
    /// # Errors
    /// Returns the `DateError` from validation or from the engine's parser.
    pub fn resolve<E, C>(self, engine: &E, clock: &C) -> Result<CalendarDate, DateError>
    where
        E: DateEngine + ?Sized,
        C: Clock + ?Sized,
    {
        tracing::trace!(input = ?self, "resolving date input");
        match self {
            Self::Now => CalendarDate::try_from(clock.today()),
            Self::Ymd(year, month, day) => CalendarDate::checked(year, month, day),
            Self::Text(text) => engine.parse(&text),
            Self::Platform(date) => CalendarDate::try_from(date),
            Self::Existing(date) => Ok(date),
        }
    }
}

impl From<()> for DateInput {
    fn from((): ()) -> Self {
        Self::Now
    }
}

/// January 1st of the given year
impl From<i32> for DateInput {
    fn from(year: i32) -> Self {
        Self::Ymd(i64::from(year), 1, 1)
    }
}

/// The first of the given month
impl From<(i32, i32)> for DateInput {
    fn from((year, month): (i32, i32)) -> Self {
        Self::Ymd(i64::from(year), i64::from(month), 1)
    }
}

impl From<(i32, i32, i32)> for DateInput {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::Ymd(i64::from(year), i64::from(month), i64::from(day))
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Platform(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::Platform(datetime.date())
    }
}

/// The date on the wall clock of the value's own time zone
impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::Platform(datetime.date_naive())
    }
}

impl From<CalendarDate> for DateInput {
    fn from(date: CalendarDate) -> Self {
        Self::Existing(date)
    }
}

/// Maps a dynamically typed argument onto an input shape.
///
/// `null` and `[]` mean now, an integer is a year, a string is date text,
/// an array holds up to three integer components and an object carries
/// `year` with optional `month` and `day`. Month and day default to 1.
/// A one-element array holds a string, an integer or an object.
impl TryFrom<&Value> for DateInput {
    type Error = DateError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Now),
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Number(_) => Ok(Self::Ymd(integer(value, "year")?, 1, 1)),
            Value::Array(items) => from_components(items),
            Value::Object(fields) => from_fields(fields),
            Value::Bool(_) => Err(DateError::UnsupportedInput(format!(
                "unsupported parameter type {}",
                type_name(value)
            ))),
        }
    }
}

fn from_components(items: &[Value]) -> Result<DateInput, DateError> {
    match items {
        [] => Ok(DateInput::Now),
        // A lone argument must itself be a single-argument shape
        [single @ (Value::String(_) | Value::Number(_) | Value::Object(_))] => {
            DateInput::try_from(single)
        }
        [single] => Err(DateError::UnsupportedInput(format!(
            "unsupported parameter type {}",
            type_name(single)
        ))),
        [year, rest @ ..] if rest.len() <= 2 => {
            if !year.is_i64() {
                return Err(DateError::UnsupportedInput(
                    "year must be an integer when multiple arguments are passed".to_owned(),
                ));
            }
            let month = rest.first().map_or(Ok(1), |v| integer(v, "month"))?;
            let day = rest.get(1).map_or(Ok(1), |v| integer(v, "day"))?;
            Ok(DateInput::Ymd(integer(year, "year")?, month, day))
        }
        _ => Err(DateError::UnsupportedInput(format!(
            "expected at most 3 date components, found {}",
            items.len()
        ))),
    }
}

fn from_fields(fields: &Map<String, Value>) -> Result<DateInput, DateError> {
    let Some(year) = fields.get("year") else {
        return Err(DateError::UnsupportedInput(
            "object input requires a \"year\" field".to_owned(),
        ));
    };
    let month = fields.get("month").map_or(Ok(1), |v| integer(v, "month"))?;
    let day = fields.get("day").map_or(Ok(1), |v| integer(v, "day"))?;
    Ok(DateInput::Ymd(integer(year, "year")?, month, day))
}

fn integer(value: &Value, field: &str) -> Result<i64, DateError> {
    value.as_i64().ok_or_else(|| {
        DateError::UnsupportedInput(format!(
            "{field} must be an integer, found {}",
            type_name(value)
        ))
    })
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
