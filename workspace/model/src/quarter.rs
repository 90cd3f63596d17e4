use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Calendar quarter identifier rendered as `YYYYQn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuarterLabel {
    year: i32,
    quarter: u32,
}

impl QuarterLabel {
    /// Quarter containing `date` (months 1-3 are Q1, ..., 10-12 are Q4).
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u32 {
        self.quarter
    }

    /// Whether `date` falls into this quarter.
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

/// Formats a date as its calendar-quarter label, e.g. `2020-12-31` -> `2020Q4`.
pub fn quarter_label(date: NaiveDate) -> String {
    QuarterLabel::from_date(date).to_string()
}

impl fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

impl FromStr for QuarterLabel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidQuarterLabel(s.to_string());
        let trimmed = s.trim();
        let (year, quarter) = trimmed
            .split_once(['Q', 'q'])
            .ok_or_else(invalid)?;

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let quarter: u32 = quarter.parse().map_err(|_| invalid())?;
        if !(1..=4).contains(&quarter) {
            return Err(invalid());
        }

        Ok(Self { year, quarter })
    }
}

impl TryFrom<String> for QuarterLabel {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuarterLabel> for String {
    fn from(label: QuarterLabel) -> Self {
        label.to_string()
    }
}
