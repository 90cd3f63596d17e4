//! Common transport-layer types shared between the compute crate, the API
//! server and any front-end rendering the returned chart specifications.

pub mod chart;

pub use chart::{
    AxisSpec, ChartLayout, Figure, HoverMode, LegendSpec, LineStyle, MarkerStyle, TitleSpec,
    Trace, TraceMode, ValueRange, XValue,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

// ===================== Countries =====================

/// Country offered by the country selector.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CountryDto {
    /// Two-letter code used in URLs (e.g. "ez")
    pub code: String,
    /// Display name
    pub name: String,
    /// Whether this country is preselected
    pub is_default: bool,
}

/// Where a loaded table came from.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataOrigin {
    /// Read from the per-country data file
    File { path: String },
    /// Generated sample data, used because the data file could not be loaded
    Synthetic { reason: String },
}

impl DataOrigin {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataOrigin::Synthetic { .. })
    }
}

// ===================== Tables and curves =====================

/// One observation row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ObservationRowDto {
    pub time: NaiveDate,
    pub quarter_label: String,
    /// Values aligned with the table's horizons; null where missing
    pub values: Vec<Option<f64>>,
}

/// Full observation table of a country.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TableDto {
    pub country: String,
    pub origin: DataOrigin,
    /// Horizon lengths in quarters, ascending
    pub horizons: Vec<u32>,
    pub rows: Vec<ObservationRowDto>,
}

/// Structure curve of one survey date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CurveDto {
    pub date: NaiveDate,
    pub quarter_label: String,
    pub horizons: Vec<u32>,
    pub values: Vec<Option<f64>>,
}

/// Quarter labels available for selection, with the preselected values.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct QuarterOptions {
    pub labels: Vec<String>,
    /// Preselected quarters of the comparison view
    pub default_comparison: Vec<String>,
    /// Preselected slider position of the evolution view
    pub default_evolution_index: usize,
}

/// One headline value of a structure curve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CurveMetric {
    /// Display label, e.g. "Short term (1Q)"
    pub label: String,
    /// Horizon length in quarters the value was taken from
    pub horizon: u32,
    pub value: Option<f64>,
}

/// Short-, medium- and long-term values of a structure curve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CurveMetrics {
    pub quarter_label: String,
    pub short_term: CurveMetric,
    pub medium_term: CurveMetric,
    pub long_term: CurveMetric,
}

/// Evolution chart together with the metrics of the displayed curve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EvolutionView {
    pub index: usize,
    pub figure: Figure,
    pub metrics: CurveMetrics,
}

// ===================== Export =====================

/// Downloadable CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ExportPayload {
    pub file_name: String,
    pub mime_type: String,
    pub row_count: usize,
    /// Base64 encoded CSV text
    pub base64: String,
    /// `data:` URI ready to be used as a download link target
    pub data_uri: String,
}
