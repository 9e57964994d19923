use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_GREGORIAN_CYCLE, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_DAY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR,
    UNIX_EPOCH_SHIFT,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1000..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it lies in `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is out of range.
    pub fn new(value: u16) -> Result<Self, DateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
            return Err(DateError::InvalidYear(i64::from(value)));
        }
        let non_zero = NonZeroU16::new(value).ok_or(DateError::InvalidYear(0))?;
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Year {
    type Error = DateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map_err(|_| DateError::InvalidYear(value))
            .and_then(Self::new)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidMonth(0))?;
        if value > MAX_MONTH {
            return Err(DateError::InvalidMonth(i64::from(value)));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Month {
    type Error = DateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| DateError::InvalidMonth(value))
            .and_then(Self::new)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of the given month
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is outside `1..=31`, or
    /// `DateError::DayNotInMonth` if the month is shorter than `value`.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, DateError> {
        if !(MIN_DAY..=MAX_DAY).contains(&value) {
            return Err(DateError::InvalidDay(i64::from(value)));
        }
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidDay(0))?;

        if value > days_in_month(i32::from(year.get()), month.get()) {
            return Err(DateError::DayNotInMonth {
                year: i64::from(year.get()),
                month: i64::from(month.get()),
                day: i64::from(value),
            });
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    pub(crate) const FIRST: Self = Self(NonZeroU8::MIN);

    /// Last day of the given month
    pub(crate) fn last_of(year: Year, month: Month) -> Self {
        let last = days_in_month(i32::from(year.get()), month.get());
        // Month lengths are never zero
        Self(NonZeroU8::new(last).unwrap_or(NonZeroU8::MIN))
    }
}

impl TryFrom<u8> for Day {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate against a month here, only the 1..=31 bound
        if !(MIN_DAY..=MAX_DAY).contains(&value) {
            return Err(DateError::InvalidDay(i64::from(value)));
        }
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidDay(0))?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
///
/// Years are shifted to start in March so the leap day is the last day of
/// the shifted year, which keeps the day-of-year formula month-linear.
pub(crate) const fn day_number(year: i32, month: u8, day: u8) -> i64 {
    let y = if month <= FEBRUARY {
        year as i64 - 1
    } else {
        year as i64
    };
    let era = y.div_euclid(GREGORIAN_CYCLE as i64);
    let year_of_era = y - era * GREGORIAN_CYCLE as i64;
    let shifted_month = (month as i64 + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_GREGORIAN_CYCLE + day_of_era - UNIX_EPOCH_SHIFT
}
