//! Structure-curve extraction and quarter selection helpers.

use chrono::NaiveDate;
use common::{CurveMetric, CurveMetrics};
use model::{CurveRecord, ObservationTable, QuarterLabel};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Number of quarters preselected in the comparison view.
pub const DEFAULT_COMPARISON_COUNT: usize = 3;

/// One curve record per table row, in chronological order.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn extract_curves(table: &ObservationTable) -> Vec<CurveRecord> {
    let curves: Vec<CurveRecord> = table
        .rows()
        .iter()
        .map(|row| CurveRecord::from_observation(table.horizons(), row))
        .collect();
    debug!(curves = curves.len(), "Extracted structure curves");
    curves
}

/// Quarter labels of all curves, in curve order.
pub fn quarter_labels(curves: &[CurveRecord]) -> Vec<String> {
    curves.iter().map(|curve| curve.quarter_label.clone()).collect()
}

/// The most recent quarters (all of them when fewer are available).
pub fn default_comparison_selection(curves: &[CurveRecord]) -> Vec<String> {
    let start = curves.len().saturating_sub(DEFAULT_COMPARISON_COUNT);
    quarter_labels(&curves[start..])
}

/// Slider position of the most recent curve.
pub fn default_evolution_index(curves: &[CurveRecord]) -> usize {
    curves.len().saturating_sub(1)
}

/// Position of the first curve carrying `label`.
pub fn find_curve_index(curves: &[CurveRecord], label: &str) -> Result<usize> {
    let wanted: QuarterLabel = label
        .parse()
        .map_err(|_| ComputeError::UnknownQuarter(label.to_string()))?;
    let wanted = wanted.to_string();
    curves
        .iter()
        .position(|curve| curve.quarter_label == wanted)
        .ok_or(ComputeError::UnknownQuarter(label.to_string()))
}

/// Maps quarter labels to the date of the first row in each quarter, keeping
/// the caller's order.
pub fn resolve_quarters<S: AsRef<str>>(table: &ObservationTable, labels: &[S]) -> Result<Vec<NaiveDate>> {
    labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            let quarter: QuarterLabel = label
                .parse()
                .map_err(|_| ComputeError::UnknownQuarter(label.to_string()))?;
            table
                .dates()
                .find(|date| quarter.contains(*date))
                .ok_or_else(|| ComputeError::UnknownQuarter(label.to_string()))
        })
        .collect()
}

fn metric(curve: &CurveRecord, label: &str, position: usize) -> CurveMetric {
    // Curves shorter than the requested position report their longest horizon
    let position = if position < curve.len() {
        position
    } else {
        curve.len().saturating_sub(1)
    };
    CurveMetric {
        label: label.to_string(),
        horizon: curve.horizons.get(position).copied().unwrap_or_default(),
        value: curve.values.get(position).copied().flatten(),
    }
}

/// Short-term (1Q), medium-term (8Q) and long-term (20Q) values of a curve.
pub fn curve_metrics(curve: &CurveRecord) -> CurveMetrics {
    CurveMetrics {
        quarter_label: curve.quarter_label.clone(),
        short_term: metric(curve, "Short term (1Q)", 0),
        medium_term: metric(curve, "Medium term (8Q)", 7),
        long_term: metric(curve, "Long term (20Q)", 19),
    }
}
