//! Calendar month arithmetic.
//!
//! A [`MonthKey`] identifies one displayed month of the planner. It is the key
//! of the reservation cache and of the stale-response guard, and it renders as
//! `yyyy-MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for month parsing and construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthKeyError {
    #[error("Invalid month format, expected yyyy-MM: {0}")]
    InvalidFormat(String),
    #[error("Month out of range: {0}")]
    OutOfRange(u32),
    #[error("Year out of range: {0}")]
    YearOutOfRange(i32),
}

/// Year + month identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key, validating the month number (1-12).
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::OutOfRange(month));
        }
        // NaiveDate supports roughly +-262000 years; stay well inside it.
        if !(1..=9999).contains(&year) {
            return Err(MonthKeyError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Number of days in the month.
    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take(self.day_count() as usize)
            .collect()
    }

    /// Whether the date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The previous month.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The following month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Every month touched by the inclusive date range, in order.
    ///
    /// Returns an empty list when `end` precedes `start`.
    pub fn spanning(start: NaiveDate, end: NaiveDate) -> Vec<Self> {
        if end < start {
            return Vec::new();
        }
        let last = Self::from_date(end);
        let mut current = Self::from_date(start);
        let mut months = vec![current];
        while current != last {
            current = current.next();
            months.push(current);
        }
        months
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthKeyError::InvalidFormat(s.to_string()))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(MonthKeyError::InvalidFormat(s.to_string()));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| MonthKeyError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthKeyError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let march = MonthKey::new(2024, 3).unwrap();
        assert_eq!(march.first_day(), date(2024, 3, 1));
        assert_eq!(march.last_day(), date(2024, 3, 31));
        assert_eq!(march.day_count(), 31);
    }

    #[test]
    fn test_leap_february() {
        let feb = MonthKey::new(2024, 2).unwrap();
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(feb.days().len(), 29);

        let feb = MonthKey::new(2023, 2).unwrap();
        assert_eq!(feb.days().len(), 28);
    }

    #[test]
    fn test_previous_and_next_wrap_years() {
        let jan = MonthKey::new(2024, 1).unwrap();
        assert_eq!(jan.previous(), MonthKey::new(2023, 12).unwrap());

        let dec = MonthKey::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthKey::new(2025, 1).unwrap());
    }

    #[test]
    fn test_display_and_parse() {
        let key = MonthKey::new(2024, 3).unwrap();
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<MonthKey>().unwrap(), key);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "2024-3".parse::<MonthKey>(),
            Err(MonthKeyError::InvalidFormat(_))
        ));
        assert!(matches!(
            "march".parse::<MonthKey>(),
            Err(MonthKeyError::InvalidFormat(_))
        ));
        assert_eq!(
            "2024-13".parse::<MonthKey>(),
            Err(MonthKeyError::OutOfRange(13))
        );
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2024, 11).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-11\"");

        let parsed: MonthKey = serde_json::from_str("\"2024-11\"").unwrap();
        assert_eq!(parsed, key);
        assert!(serde_json::from_str::<MonthKey>("\"2024-00\"").is_err());
    }

    #[test]
    fn test_spanning_months() {
        let months = MonthKey::spanning(date(2024, 1, 30), date(2024, 3, 2));
        assert_eq!(
            months,
            vec![
                MonthKey::new(2024, 1).unwrap(),
                MonthKey::new(2024, 2).unwrap(),
                MonthKey::new(2024, 3).unwrap(),
            ]
        );

        let single = MonthKey::spanning(date(2024, 3, 10), date(2024, 3, 12));
        assert_eq!(single, vec![MonthKey::new(2024, 3).unwrap()]);

        assert!(MonthKey::spanning(date(2024, 3, 12), date(2024, 3, 10)).is_empty());
    }

    #[test]
    fn test_contains() {
        let key = MonthKey::new(2024, 3).unwrap();
        assert!(key.contains(date(2024, 3, 15)));
        assert!(!key.contains(date(2024, 4, 1)));
        assert!(!key.contains(date(2023, 3, 15)));
    }
}
