use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DateError, prelude::*};

/// Calendar unit accepted by [`CalendarDate::add`](crate::CalendarDate::add).
///
/// Parses from either spelling of the unit name: `year`/`years`,
/// `month`/`months`, `day`/`days`. Displays and serializes as the plural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum DateUnit {
    #[display(fmt = "years")]
    #[serde(rename = "years", alias = "year")]
    Years,
    #[display(fmt = "months")]
    #[serde(rename = "months", alias = "month")]
    Months,
    #[display(fmt = "days")]
    #[serde(rename = "days", alias = "day")]
    Days,
}

impl FromStr for DateUnit {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" | "years" => Ok(Self::Years),
            "month" | "months" => Ok(Self::Months),
            "day" | "days" => Ok(Self::Days),
            other => Err(DateError::InvalidUnit(other.to_owned())),
        }
    }
}

impl TryFrom<&str> for DateUnit {
    type Error = DateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_and_plural_aliases() {
        let cases = [
            ("year", DateUnit::Years),
            ("years", DateUnit::Years),
            ("month", DateUnit::Months),
            ("months", DateUnit::Months),
            ("day", DateUnit::Days),
            ("days", DateUnit::Days),
        ];
        for (token, expected) in cases {
            assert_eq!(token.parse::<DateUnit>().unwrap(), expected, "token {token}");
        }
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        for token in ["weeks", "Years", " days", "", "d"] {
            let result = token.parse::<DateUnit>();
            assert_eq!(result, Err(DateError::InvalidUnit(token.to_owned())));
        }
    }

    #[test]
    fn test_display_is_plural() {
        assert_eq!(DateUnit::Years.to_string(), "years");
        assert_eq!(DateUnit::Months.to_string(), "months");
        assert_eq!(DateUnit::Days.to_string(), "days");
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&DateUnit::Months).unwrap(), r#""months""#);

        let unit: DateUnit = serde_json::from_str(r#""day""#).unwrap();
        assert_eq!(unit, DateUnit::Days);

        let result: Result<DateUnit, _> = serde_json::from_str(r#""fortnight""#);
        assert!(result.is_err());
    }
}
