//! CSV export of the full table or of selected rows.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use common::ExportPayload;
use model::{Observation, ObservationTable};
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::schema::TIME_COLUMN;

pub const FULL_EXPORT_FILE_NAME: &str = "inflation_expectations.csv";
pub const SELECTION_EXPORT_FILE_NAME: &str = "selected_quarters.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Builds the export frame: `Time` followed by one column per horizon.
pub fn to_dataframe(table: &ObservationTable, rows: &[&Observation]) -> Result<DataFrame> {
    let dates: Vec<NaiveDate> = rows.iter().map(|row| row.time).collect();
    let mut columns: Vec<Column> = Vec::with_capacity(table.horizons().len() + 1);
    columns.push(Series::new(TIME_COLUMN.into(), dates).into());

    for (i, horizon) in table.horizons().iter().enumerate() {
        let values: Vec<Option<f64>> = rows.iter().map(|row| row.values[i]).collect();
        columns.push(Series::new(horizon.column_name().into(), values).into());
    }

    Ok(DataFrame::new(columns)?)
}

/// Serializes rows to CSV text with a header line; missing values are empty.
pub fn to_csv(table: &ObservationTable, rows: &[&Observation]) -> Result<String> {
    let mut df = to_dataframe(table, rows)?;
    let mut buffer: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_date_format(Some("%Y-%m-%d".into()))
        .finish(&mut df)?;
    String::from_utf8(buffer).map_err(|e| ComputeError::Export(e.to_string()))
}

/// Wraps CSV text into a download payload.
pub fn payload(file_name: &str, csv: &str, row_count: usize) -> ExportPayload {
    let encoded = STANDARD.encode(csv.as_bytes());
    ExportPayload {
        file_name: file_name.to_string(),
        mime_type: CSV_MIME_TYPE.to_string(),
        row_count,
        data_uri: format!("data:{};base64,{}", CSV_MIME_TYPE, encoded),
        base64: encoded,
    }
}

/// Every row of the table.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn export_table(table: &ObservationTable) -> Result<ExportPayload> {
    let rows: Vec<&Observation> = table.rows().iter().collect();
    let csv = to_csv(table, &rows)?;
    debug!(bytes = csv.len(), "Exported full table");
    Ok(payload(FULL_EXPORT_FILE_NAME, &csv, rows.len()))
}

/// Rows whose date is in `dates`, in table order. Unknown dates are ignored.
#[instrument(skip(table, dates), fields(selected = dates.len()))]
pub fn export_selection(table: &ObservationTable, dates: &[NaiveDate]) -> Result<ExportPayload> {
    let rows = table.select_dates(dates);
    let csv = to_csv(table, &rows)?;
    debug!(rows = rows.len(), bytes = csv.len(), "Exported selection");
    Ok(payload(SELECTION_EXPORT_FILE_NAME, &csv, rows.len()))
}

/// Decodes the base64 body of a payload back into CSV text.
pub fn decode_payload(payload: &ExportPayload) -> Result<String> {
    let bytes = STANDARD
        .decode(payload.base64.as_bytes())
        .map_err(|e| ComputeError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ComputeError::Export(e.to_string()))
}
