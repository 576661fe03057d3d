use std::fmt;

use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::first_of_month;
use crate::{Error, Result};

/// A validated year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        match first_of_month(year, month) {
            Some(_) => Ok(Self { year, month }),
            None => Err(Error::InvalidDate(format!(
                "{year:04}-{month:02} is not a supported month"
            ))),
        }
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses a two-digit month (`01`-`12`) and a four-digit year token.
    pub fn from_tokens(month: &str, year: &str) -> Result<Self> {
        let malformed = || {
            Error::MissingOrMalformedNavigationToken(format!("month `{month}`, year `{year}`"))
        };

        let all_digits = |token: &str, len: usize| {
            token.len() == len && token.bytes().all(|byte| byte.is_ascii_digit())
        };

        if !all_digits(month, 2) || !all_digits(year, 4) {
            return Err(malformed());
        }

        let month_number = month.parse::<u32>().map_err(|_| malformed())?;
        let year_number = year.parse::<i32>().map_err(|_| malformed())?;

        if !(1..=12).contains(&month_number) || year_number < 1 {
            return Err(malformed());
        }

        Self::new(year_number, month_number)
    }

    /// The month named by the tokens, or `fallback` when either token is
    /// absent or malformed.
    #[must_use]
    pub fn resolve(month: Option<&str>, year: Option<&str>, fallback: MonthRef) -> Self {
        let (Some(month), Some(year)) = (month, year) else {
            return fallback;
        };

        match Self::from_tokens(month, year) {
            Ok(month_ref) => month_ref,
            Err(err) => {
                tracing::debug!(%err, %fallback, "ignoring navigation request");
                fallback
            }
        }
    }

    /// `("MM", "YYYY")` as used in navigation links.
    #[must_use]
    pub fn tokens(&self) -> (String, String) {
        (format!("{:02}", self.month), format!("{:04}", self.year))
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        let (year, month) = match self.month {
            12 => (self.year.checked_add(1)?, 1),
            month => (self.year, month.checked_add(1)?),
        };

        Self::new(year, month).ok()
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        let (year, month) = match self.month {
            1 => (self.year.checked_sub(1)?, 12),
            month => (self.year, month.checked_sub(1)?),
        };

        Self::new(year, month).ok()
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> MonthRef {
        MonthRef::new(year, month).unwrap()
    }

    #[test]
    fn valid_tokens() {
        assert_eq!(MonthRef::from_tokens("02", "2024").unwrap(), month(2024, 2));
        assert_eq!(MonthRef::from_tokens("12", "0001").unwrap(), month(1, 12));
    }

    #[test]
    fn malformed_tokens() {
        for (m, y) in [
            ("2", "2024"),
            ("13", "2024"),
            ("00", "2024"),
            ("1a", "2024"),
            ("02", "24"),
            ("02", "20245"),
            ("02", "+024"),
            ("02", "0000"),
            ("", ""),
            ("０２", "2024"),
        ] {
            assert!(
                matches!(
                    MonthRef::from_tokens(m, y),
                    Err(Error::MissingOrMalformedNavigationToken(_))
                ),
                "accepted {m:?} / {y:?}"
            );
        }
    }

    #[test]
    fn falls_back_when_absent_or_malformed() {
        let fallback = month(2026, 10);

        assert_eq!(MonthRef::resolve(None, Some("2024"), fallback), fallback);
        assert_eq!(MonthRef::resolve(Some("02"), None, fallback), fallback);
        assert_eq!(MonthRef::resolve(Some("14"), Some("2024"), fallback), fallback);
        assert_eq!(
            MonthRef::resolve(Some("03"), Some("2024"), fallback),
            month(2024, 3)
        );
    }

    #[test]
    fn adjacent_months_roll_over_years() {
        assert_eq!(month(2024, 12).next(), Some(month(2025, 1)));
        assert_eq!(month(2024, 1).previous(), Some(month(2023, 12)));
        assert_eq!(month(2024, 6).next(), Some(month(2024, 7)));
        assert_eq!(month(2024, 6).previous(), Some(month(2024, 5)));
        assert_eq!(month(1, 1).previous(), None);

        let unsupported = MonthRef {
            year: i32::MIN,
            month: 1,
        };
        assert_eq!(unsupported.previous(), None);

        let zero = MonthRef { year: 2024, month: 0 };
        assert_eq!(zero.previous(), None);
        let huge = MonthRef {
            year: 2024,
            month: u32::MAX,
        };
        assert_eq!(huge.next(), None);
    }

    #[test]
    fn tokens_are_zero_padded() {
        assert_eq!(
            month(987, 3).tokens(),
            ("03".to_string(), "0987".to_string())
        );
        assert_eq!(month(2024, 3).to_string(), "2024-03");
    }
}
