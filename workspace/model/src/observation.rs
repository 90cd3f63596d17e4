use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use tracing::trace;

use crate::error::{ModelError, Result};
use crate::horizon::Horizon;

/// Number of decimal places kept for expectation values.
pub const VALUE_DECIMALS: i32 = 3;

/// Rounds an expectation value to [`VALUE_DECIMALS`] decimal places.
pub fn round_value(value: f64) -> f64 {
    let factor = 10f64.powi(VALUE_DECIMALS);
    let scaled = value * factor;
    // Magnitudes this large carry no fractional digits anyway
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// One survey date with a value per horizon, positionally aligned with
/// [`ObservationTable::horizons`]. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub time: NaiveDate,
    pub values: Vec<Option<f64>>,
}

impl Observation {
    pub fn new(time: NaiveDate, values: Vec<Option<f64>>) -> Self {
        Self { time, values }
    }
}

/// Wide table of survey observations: one row per date, one column per horizon.
///
/// Invariants enforced on construction:
/// - at least one row and one horizon
/// - horizons unique and ascending
/// - rows strictly ascending by date
/// - every row holds exactly one value slot per horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationTable {
    horizons: Vec<Horizon>,
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Builds a table, sorting horizons and rows into canonical order.
    pub fn new(horizons: Vec<Horizon>, mut rows: Vec<Observation>) -> Result<Self> {
        if horizons.is_empty() {
            return Err(ModelError::InvalidTable("table has no horizon columns".to_string()));
        }
        if rows.is_empty() {
            return Err(ModelError::InvalidTable("table has no rows".to_string()));
        }

        let mut seen = HashSet::new();
        for horizon in &horizons {
            if !seen.insert(*horizon) {
                return Err(ModelError::InvalidTable(format!(
                    "horizon {} appears more than once",
                    horizon.column_name()
                )));
            }
        }

        for row in &rows {
            if row.values.len() != horizons.len() {
                return Err(ModelError::InvalidTable(format!(
                    "row {} has {} values but the table has {} horizons",
                    row.time,
                    row.values.len(),
                    horizons.len()
                )));
            }
        }

        // Reorder value slots so that horizons are ascending
        let mut order: Vec<usize> = (0..horizons.len()).collect();
        order.sort_by_key(|&i| horizons[i]);
        let sorted_horizons: Vec<Horizon> = order.iter().map(|&i| horizons[i]).collect();
        for row in &mut rows {
            row.values = order.iter().map(|&i| row.values[i]).collect();
        }

        rows.sort_by_key(|row| row.time);
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].time == pair[1].time) {
            return Err(ModelError::InvalidTable(format!(
                "date {} appears more than once",
                pair[0].time
            )));
        }

        trace!(
            rows = rows.len(),
            horizons = sorted_horizons.len(),
            "Observation table constructed"
        );

        Ok(Self {
            horizons: sorted_horizons,
            rows,
        })
    }

    pub fn horizons(&self) -> &[Horizon] {
        &self.horizons
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|row| row.time)
    }

    /// Position of `horizon` among the table's value slots.
    pub fn horizon_index(&self, horizon: Horizon) -> Option<usize> {
        self.horizons.binary_search(&horizon).ok()
    }

    /// Row observed exactly on `date`.
    pub fn row_for_date(&self, date: NaiveDate) -> Option<&Observation> {
        self.rows
            .binary_search_by_key(&date, |row| row.time)
            .ok()
            .map(|index| &self.rows[index])
    }

    /// Value trajectory of one horizon across all dates.
    pub fn column(&self, horizon: Horizon) -> Option<Vec<Option<f64>>> {
        let index = self.horizon_index(horizon)?;
        Some(self.rows.iter().map(|row| row.values[index]).collect())
    }

    /// Every non-missing value of the table.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.values.iter().copied().flatten())
            .filter(|value| value.is_finite())
    }

    /// Rows whose date is contained in `dates`, in table order.
    pub fn select_dates(&self, dates: &[NaiveDate]) -> Vec<&Observation> {
        let wanted: HashSet<NaiveDate> = dates.iter().copied().collect();
        self.rows
            .iter()
            .filter(|row| wanted.contains(&row.time))
            .collect()
    }
}
