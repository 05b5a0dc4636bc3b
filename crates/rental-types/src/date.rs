//! Calendar-day value used for trip ranges and inspection expiry
//!
//! Text form is `d/m/yyyy` without zero padding. A date may be empty; the
//! ordering predicates treat an empty side as incomparable, so `before` and
//! `after` return false while `at_least` and `at_most` return true.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

pub const DATE_DELIMITER: char = '/';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Date {
    value: Option<NaiveDate>,
}

impl Date {
    /// Current local date
    pub fn now() -> Self {
        Self {
            value: Some(Local::now().date_naive()),
        }
    }

    pub fn empty() -> Self {
        Self { value: None }
    }

    pub fn from_dmy(day: u32, month: u32, year: i32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|d| Self { value: Some(d) })
            .ok_or_else(|| ValidationError::InvalidDate(format!("{}/{}/{}", day, month, year)))
    }

    /// Parse `d/m/yyyy`. Exactly three numeric components naming a real day.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate(text.to_string());

        let parts: Vec<&str> = text.trim().split(DATE_DELIMITER).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        if parts
            .iter()
            .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(invalid());
        }

        let day: u32 = parts[0].parse().map_err(|_| invalid())?;
        let month: u32 = parts[1].parse().map_err(|_| invalid())?;
        let year: i32 = parts[2].parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(|d| Self { value: Some(d) })
            .ok_or_else(invalid)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// `d/m/yyyy`, or an empty string for an empty date
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn naive(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn before(&self, other: &Date) -> bool {
        match (self.value, other.value) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    pub fn after(&self, other: &Date) -> bool {
        match (self.value, other.value) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }

    /// `!before(other)`
    pub fn at_least(&self, other: &Date) -> bool {
        !self.before(other)
    }

    /// `!after(other)`
    pub fn at_most(&self, other: &Date) -> bool {
        !self.after(other)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(d) => write!(f, "{}/{}/{}", d.day(), d.month(), d.year()),
            None => Ok(()),
        }
    }
}

impl FromStr for Date {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Self { value: Some(d) }
    }
}

impl From<Date> for String {
    fn from(d: Date) -> Self {
        d.to_string()
    }
}

impl TryFrom<String> for Date {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            Ok(Date::empty())
        } else {
            Date::parse(&s)
        }
    }
}
