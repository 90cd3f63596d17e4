use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};

/// Forecast lead time measured in quarters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Horizon(u32);

impl Horizon {
    /// Shortest horizon in the survey.
    pub const MIN: u32 = 1;
    /// Longest horizon in the survey (ten years).
    pub const MAX: u32 = 40;
    /// Prefix shared by every horizon column.
    pub const COLUMN_PREFIX: &'static str = "pi_";

    /// Creates a horizon, rejecting lead times outside `1..=40`.
    pub fn new(quarters: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&quarters) {
            Ok(Self(quarters))
        } else {
            Err(ModelError::InvalidHorizon {
                column: Self::column_name_for(quarters),
                reason: format!(
                    "horizon must be between {} and {} quarters",
                    Self::MIN,
                    Self::MAX
                ),
            })
        }
    }

    /// Iterates over every survey horizon in ascending order.
    pub fn all() -> impl Iterator<Item = Horizon> {
        (Self::MIN..=Self::MAX).map(Horizon)
    }

    pub fn quarters(&self) -> u32 {
        self.0
    }

    /// Column identifier, e.g. `pi_8q`.
    pub fn column_name(&self) -> String {
        Self::column_name_for(self.0)
    }

    fn column_name_for(quarters: u32) -> String {
        format!("{}{}q", Self::COLUMN_PREFIX, quarters)
    }

    /// Parses a (whitespace-normalized) column identifier.
    ///
    /// Returns `Ok(None)` for columns that are not horizon columns at all and an
    /// error for columns that carry the `pi_` prefix but are malformed or out of range.
    pub fn parse_column(column: &str) -> Result<Option<Horizon>> {
        let Some(rest) = column.strip_prefix(Self::COLUMN_PREFIX) else {
            return Ok(None);
        };

        let invalid = |reason: &str| ModelError::InvalidHorizon {
            column: column.to_string(),
            reason: reason.to_string(),
        };

        let digits = rest
            .strip_suffix('q')
            .ok_or_else(|| invalid("expected a 'q' suffix"))?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number of quarters"));
        }
        let quarters: u32 = digits
            .parse()
            .map_err(|_| invalid("number of quarters does not fit"))?;

        Horizon::new(quarters)
            .map(Some)
            .map_err(|_| invalid("horizon must be between 1 and 40 quarters"))
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 quarter")
        } else {
            write!(f, "{} quarters", self.0)
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self> {
        Horizon::new(value)
    }
}
