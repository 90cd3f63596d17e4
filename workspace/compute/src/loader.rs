//! Loading of per-country observation tables.
//!
//! Data files live at `<data_dir>/<country code>/FittedTermStructure.csv`. A file
//! that is missing or unusable never fails the caller: the loader falls back to
//! the synthetic dataset and records why in the returned [`DataOrigin`].

use chrono::{NaiveDate, NaiveDateTime};
use common::DataOrigin;
use model::observation::round_value;
use model::{Country, Observation, ObservationTable};
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{ComputeError, Result};
use crate::schema::detect_schema;
use crate::synthetic;

/// File name of every per-country data file.
pub const DATA_FILE_NAME: &str = "FittedTermStructure.csv";

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// An observation table together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub country: Country,
    pub table: Arc<ObservationTable>,
    pub origin: DataOrigin,
}

/// Anything that can produce the observation table of a country.
pub trait TableSource: Send + Sync {
    /// Loads the table of `country`.
    ///
    /// Implementations fall back to sample data for unusable sources; an error
    /// means not even a fallback table could be produced.
    fn load(&self, country: Country) -> Result<LoadedTable>;
}

/// Reads tables from CSV files below a data directory.
#[derive(Debug, Clone)]
pub struct FileTableSource {
    data_dir: PathBuf,
}

impl FileTableSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Location of the data file of `country`.
    pub fn path_for(&self, country: Country) -> PathBuf {
        self.data_dir.join(country.code()).join(DATA_FILE_NAME)
    }

    /// Loads the data file of `country` without any fallback.
    #[instrument(skip(self))]
    pub fn try_load(&self, country: Country) -> Result<ObservationTable> {
        let path = self.path_for(country);
        if !path.is_file() {
            return Err(ComputeError::SourceNotFound(path));
        }
        read_table_csv(&path)
    }
}

impl TableSource for FileTableSource {
    fn load(&self, country: Country) -> Result<LoadedTable> {
        let path = self.path_for(country);
        match self.try_load(country) {
            Ok(table) => {
                info!(
                    country = %country,
                    rows = table.len(),
                    horizons = table.horizons().len(),
                    "Loaded observation table from {}",
                    path.display()
                );
                Ok(LoadedTable {
                    country,
                    table: Arc::new(table),
                    origin: DataOrigin::File {
                        path: path.display().to_string(),
                    },
                })
            }
            Err(e) => {
                warn!(country = %country, error = %e, "Falling back to synthetic sample data");
                synthetic_table(country, e.to_string())
            }
        }
    }
}

/// Loads the synthetic dataset for `country`, recording `reason` as diagnostic.
pub fn synthetic_table(country: Country, reason: String) -> Result<LoadedTable> {
    let table = synthetic::generate()?;
    Ok(LoadedTable {
        country,
        table: Arc::new(table),
        origin: DataOrigin::Synthetic { reason },
    })
}

/// Reads and normalizes a data file.
pub fn read_table_csv(path: &Path) -> Result<ObservationTable> {
    debug!("Reading CSV file {}", path.display());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    table_from_dataframe(&df)
}

/// Parses CSV text (for example an export) into a normalized table.
pub fn parse_table_csv(text: &str) -> Result<ObservationTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()?;
    table_from_dataframe(&df)
}

/// Converts a raw DataFrame into an observation table.
///
/// Column names are normalized and validated, the time column is parsed into
/// dates, horizon values are cast to floats and rounded to three decimals, and
/// rows are sorted ascending by date.
pub fn table_from_dataframe(df: &DataFrame) -> Result<ObservationTable> {
    let raw_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect();
    let schema = detect_schema(&raw_names)?;
    trace!(?schema, "Detected table schema");

    let columns = df.get_columns();

    let time_series = columns[schema.time_position]
        .cast(&DataType::String)?
        .as_materialized_series()
        .clone();
    let mut times = Vec::with_capacity(df.height());
    for (row, cell) in time_series.str()?.into_iter().enumerate() {
        let text = cell.ok_or_else(|| {
            ComputeError::Date(format!("row {} has no value in column '{}'", row + 1, schema.time_column))
        })?;
        times.push(parse_time(text)?);
    }

    let mut value_columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(schema.horizon_columns.len());
    for horizon_column in &schema.horizon_columns {
        let series = columns[horizon_column.position]
            .cast(&DataType::Float64)?
            .as_materialized_series()
            .clone();
        let values = series
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()).map(round_value))
            .collect();
        value_columns.push(values);
    }

    let rows: Vec<Observation> = times
        .into_iter()
        .enumerate()
        .map(|(i, time)| Observation::new(time, value_columns.iter().map(|column| column[i]).collect()))
        .collect();
    let horizons = schema
        .horizon_columns
        .iter()
        .map(|column| column.horizon)
        .collect();

    Ok(ObservationTable::new(horizons, rows)?)
}

/// Parses a time cell; accepts ISO dates, ISO date-times and common day-first formats.
pub fn parse_time(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }
    Err(ComputeError::Date(format!("cannot parse '{}' as a date", text)))
}
