//! Column layout detection for per-country data files.
//!
//! A data file has one time column and one column per forecast horizon named
//! `pi_<N>q`. Column names are compared after removing all whitespace, so
//! `pi_1 q` and `pi_1q` denote the same column.

use model::Horizon;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Canonical name of the time column.
pub const TIME_COLUMN: &str = "Time";

const DUPLICATED_SUFFIX: &str = "_duplicated_";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("file has no columns")]
    NoColumns,

    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("no 'Time' column and the first column '{0}' is a horizon column")]
    MissingTimeColumn(String),

    #[error("no horizon columns (expected names like 'pi_1q')")]
    NoHorizonColumns,

    #[error("{0}")]
    InvalidHorizon(String),

    #[error("columns '{first}' and '{second}' both hold horizon {quarters}")]
    DuplicateHorizon {
        first: String,
        second: String,
        quarters: u32,
    },
}

/// A horizon column of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonColumn {
    /// Position of the column in the source file
    pub position: usize,
    /// Normalized column name
    pub name: String,
    pub horizon: Horizon,
}

/// Detected layout of a data file.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    /// Position of the time column in the source file
    pub time_position: usize,
    /// Normalized name of the time column as found in the file
    pub time_column: String,
    /// Horizon columns, ascending by horizon
    pub horizon_columns: Vec<HorizonColumn>,
    /// Columns that are neither the time column nor horizon columns
    pub ignored_columns: Vec<String>,
}

/// Removes every whitespace character from a column name.
pub fn normalize_column_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Detects the time column and the horizon columns from raw header names.
pub fn detect_schema<S: AsRef<str>>(columns: &[S]) -> Result<TableSchema, SchemaError> {
    let names: Vec<String> = columns
        .iter()
        .map(|name| normalize_column_name(name.as_ref()))
        .collect();

    if names.is_empty() {
        return Err(SchemaError::NoColumns);
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (position, name) in names.iter().enumerate() {
        if positions.insert(name.as_str(), position).is_some() {
            return Err(SchemaError::DuplicateColumn(name.clone()));
        }
    }

    // The CSV reader renames repeated headers to `<name>_duplicated_<n>`
    for name in &names {
        if let Some((original, _)) = name.split_once(DUPLICATED_SUFFIX) {
            if positions.contains_key(original) {
                return Err(SchemaError::DuplicateColumn(original.to_string()));
            }
        }
    }

    let mut horizon_columns: Vec<HorizonColumn> = Vec::new();
    let mut by_horizon: HashMap<Horizon, String> = HashMap::new();
    for (position, name) in names.iter().enumerate() {
        let parsed = Horizon::parse_column(name)
            .map_err(|e| SchemaError::InvalidHorizon(e.to_string()))?;
        if let Some(horizon) = parsed {
            if let Some(first) = by_horizon.insert(horizon, name.clone()) {
                return Err(SchemaError::DuplicateHorizon {
                    first,
                    second: name.clone(),
                    quarters: horizon.quarters(),
                });
            }
            horizon_columns.push(HorizonColumn {
                position,
                name: name.clone(),
                horizon,
            });
        }
    }

    if horizon_columns.is_empty() {
        return Err(SchemaError::NoHorizonColumns);
    }
    horizon_columns.sort_by_key(|column| column.horizon);

    let time_position = match positions.get(TIME_COLUMN) {
        Some(position) => *position,
        None => {
            if horizon_columns.iter().any(|column| column.position == 0) {
                return Err(SchemaError::MissingTimeColumn(names[0].clone()));
            }
            debug!("No '{}' column, using first column '{}' as time", TIME_COLUMN, names[0]);
            0
        }
    };

    let ignored_columns: Vec<String> = names
        .iter()
        .enumerate()
        .filter(|(position, _)| {
            *position != time_position
                && !horizon_columns.iter().any(|column| column.position == *position)
        })
        .map(|(_, name)| name.clone())
        .collect();
    if !ignored_columns.is_empty() {
        debug!(?ignored_columns, "Ignoring columns that are not horizon columns");
    }

    Ok(TableSchema {
        time_position,
        time_column: names[time_position].clone(),
        horizon_columns,
        ignored_columns,
    })
}
