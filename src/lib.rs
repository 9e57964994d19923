mod consts;
mod engine;
mod error;
mod input;
mod prelude;
mod types;
mod unit;

pub use consts::*;
pub use engine::{ChronoEngine, Clock, DateEngine, FixedClock, SystemClock};
pub use error::DateError;
pub use input::DateInput;
pub use types::{Day, Month, Year};
pub use unit::DateUnit;

use crate::consts::MONTHS_PER_YEAR;
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;
use types::{day_number, days_in_month};

/// An immutable Gregorian calendar date between `MIN_YEAR` and `MAX_YEAR`.
///
/// Every value is a real date: construction rejects impossible days such
/// as February 30th, and arithmetic returns a new value. Ordering is
/// chronological. Displays and serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// Creates a date from year (1000..=9999), month (1..=12) and day
    ///
    /// # Errors
    /// Returns the `DateError` naming the first invalid field: year, month,
    /// day outside 1..=31, then a day past the end of the month.
    pub fn new(year: i32, month: i32, day: i32) -> Result<Self, DateError> {
        Self::checked(i64::from(year), i64::from(month), i64::from(day))
    }

    /// Creates a date from typed components, re-checking the day against the month
    ///
    /// # Errors
    /// Returns `DateError::DayNotInMonth` if `day` does not exist in `year`-`month`.
    pub fn from_typed(year: Year, month: Month, day: Day) -> Result<Self, DateError> {
        let day = Day::new(day.get(), year, month)?;
        Ok(Self { year, month, day })
    }

    pub(crate) fn checked(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        let year = Year::try_from(year)?;
        let month = Month::try_from(month)?;
        let day = u8::try_from(day).map_err(|_| DateError::InvalidDay(day))?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from any supported input shape, see [`DateInput`].
    ///
    /// ```ignore
    /// CalendarDate::create(());            // today
    /// CalendarDate::create(2019);          // 2019-01-01
    /// CalendarDate::create((2019, 7));     // 2019-07-01
    /// CalendarDate::create((2019, 7, 4));  // 2019-07-04
    /// CalendarDate::create("2019-12-23");  // parsed by ChronoEngine
    /// ```
    ///
    /// # Errors
    /// Returns `DateError` if the input does not name a supported date.
    pub fn create(input: impl Into<DateInput>) -> Result<Self, DateError> {
        Self::create_with(input, &ChronoEngine, &SystemClock)
    }

    /// Like [`create`](Self::create) with an explicit engine and clock.
    ///
    /// # Errors
    /// Returns `DateError` if the input does not name a supported date.
    pub fn create_with<E, C>(
        input: impl Into<DateInput>,
        engine: &E,
        clock: &C,
    ) -> Result<Self, DateError>
    where
        E: DateEngine + ?Sized,
        C: Clock + ?Sized,
    {
        input.into().resolve(engine, clock)
    }

    /// The current date on the system clock.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the clock is outside the supported years.
    pub fn today() -> Result<Self, DateError> {
        Self::create(DateInput::Now)
    }

    /// Creates a date from any chrono date-like value.
    ///
    /// # Errors
    /// Returns `DateError` if the value's year is outside the supported range.
    pub fn from_datelike<D: Datelike>(value: &D) -> Result<Self, DateError> {
        Self::checked(
            i64::from(value.year()),
            i64::from(value.month()),
            i64::from(value.day()),
        )
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component (1..=12)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day-of-month component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Gregorian leap-year rule: divisible by 4, except centuries not divisible by 400.
    pub const fn is_leap_year(year: i32) -> bool {
        types::is_leap_year(year)
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if `month` is outside 1..=12.
    pub fn last_day_of_month(year: i32, month: i32) -> Result<u8, DateError> {
        let month = Month::try_from(i64::from(month))?;
        Ok(days_in_month(year, month.get()))
    }

    /// Number of days in this date's month.
    pub fn month_length(&self) -> u8 {
        days_in_month(i32::from(self.year()), self.month())
    }

    /// Whether this date falls in a leap year.
    pub fn in_leap_year(&self) -> bool {
        Self::is_leap_year(i32::from(self.year()))
    }

    /// The first day of this date's month.
    pub const fn to_first_of_month(&self) -> Self {
        Self {
            day: Day::FIRST,
            ..*self
        }
    }

    /// The last day of this date's month.
    pub fn to_last_of_month(&self) -> Self {
        Self {
            day: Day::last_of(self.year, self.month),
            ..*self
        }
    }

    /// Returns this date moved by `count` units.
    ///
    /// `unit` is a [`DateUnit`] or one of the tokens `year(s)`, `month(s)`,
    /// `day(s)`. Month and year shifts keep the day of month when the target
    /// month has it and clamp to the target month's last day otherwise, so
    /// 2019-01-31 plus one month is 2019-02-28. Day shifts count calendar
    /// days through the default [`ChronoEngine`].
    ///
    /// # Errors
    /// Returns `DateError::InvalidUnit` for an unknown token, or the
    /// validation error of a result outside the supported years.
    pub fn add<U>(&self, count: i32, unit: U) -> Result<Self, DateError>
    where
        U: TryInto<DateUnit>,
        DateError: From<U::Error>,
    {
        self.add_with(&ChronoEngine, count, unit)
    }

    /// Like [`add`](Self::add), with day shifts delegated to `engine`.
    ///
    /// # Errors
    /// See [`add`](Self::add).
    pub fn add_with<E, U>(&self, engine: &E, count: i32, unit: U) -> Result<Self, DateError>
    where
        E: DateEngine + ?Sized,
        U: TryInto<DateUnit>,
        DateError: From<U::Error>,
    {
        let count = i64::from(count);
        match unit.try_into()? {
            DateUnit::Years => {
                self.clamped(i64::from(self.year()) + count, i64::from(self.month()))
            }
            DateUnit::Months => {
                // Zero-based month index, floored so negative offsets borrow whole years
                let index = i64::from(self.month()) - 1 + count;
                self.clamped(
                    i64::from(self.year()) + index.div_euclid(MONTHS_PER_YEAR),
                    index.rem_euclid(MONTHS_PER_YEAR) + 1,
                )
            }
            DateUnit::Days => engine.add_days(*self, count),
        }
    }

    /// This day of month in `year`-`month`, or that month's last day if shorter.
    fn clamped(&self, year: i64, month: i64) -> Result<Self, DateError> {
        let year = Year::try_from(year)?;
        let month = Month::try_from(month)?;
        let day = self.day.min(Day::last_of(year, month));
        Self::from_typed(year, month, day)
    }

    /// Signed count of calendar days from `self` to `other`.
    ///
    /// Positive when `other` is later; `a.diff_in_days(&b) == -b.diff_in_days(&a)`.
    pub fn diff_in_days(&self, other: &Self) -> i64 {
        other.days_since_unix_epoch() - self.days_since_unix_epoch()
    }

    /// Days since 1970-01-01, negative before it.
    pub fn days_since_unix_epoch(&self) -> i64 {
        day_number(i32::from(self.year()), self.month(), self.day())
    }

    /// Formats with a strftime pattern through the default [`ChronoEngine`].
    ///
    /// # Errors
    /// Returns `DateError::InvalidPattern` if the pattern is malformed or
    /// asks for a time zone.
    pub fn format(&self, pattern: &str) -> Result<String, DateError> {
        self.format_with(&ChronoEngine, pattern)
    }

    /// Formats with a pattern understood by `engine`.
    ///
    /// # Errors
    /// Returns the engine's `DateError`.
    pub fn format_with<E: DateEngine + ?Sized>(
        &self,
        engine: &E,
        pattern: &str,
    ) -> Result<String, DateError> {
        engine.format(*self, pattern)
    }
}

/// Strict canonical form: `YYYY-MM-DD`. Use [`CalendarDate::create`] for free-form text.
impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "Wrong number of {DATE_SEPARATOR} separators: expected 2, found {}",
                parts.len() - 1
            )));
        };

        Self::checked(
            Self::parse_component(year)?,
            Self::parse_component(month)?,
            Self::parse_component(day)?,
        )
    }
}

impl CalendarDate {
    /// Helper to parse an unsigned decimal component with better error messages
    fn parse_component(s: &str) -> Result<i64, DateError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_owned()));
        }
        s.parse::<i64>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(i32, i32, i32)> for CalendarDate {
    type Error = DateError;

    fn try_from((year, month, day): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_datelike(&value)
    }
}

impl TryFrom<CalendarDate> for NaiveDate {
    type Error = DateError;

    fn try_from(value: CalendarDate) -> Result<Self, Self::Error> {
        Self::from_ymd_opt(
            i32::from(value.year()),
            u32::from(value.month()),
            u32::from(value.day()),
        )
        .ok_or_else(|| DateError::OutOfRange(value.to_string()))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
