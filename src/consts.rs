/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1000;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;
/// Longest month length, the upper bound checked before the month table
pub const MAX_DAY: u8 = 31;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Months carried into one year by month arithmetic
pub(crate) const MONTHS_PER_YEAR: i64 = 12;

/// Days in one 400-year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: i64 = 146_097;
/// Day number of 1970-01-01 counted from 0000-03-01
pub(crate) const UNIX_EPOCH_SHIFT: i64 = 719_468;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
