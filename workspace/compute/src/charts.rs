//! Chart builders.
//!
//! Every builder is a pure mapping from data and parameters to a [`Figure`];
//! nothing here renders or keeps state.

use chrono::NaiveDate;
use common::{
    AxisSpec, ChartLayout, Figure, HoverMode, LegendSpec, LineStyle, MarkerStyle, TitleSpec, Trace,
    TraceMode, ValueRange, XValue,
};
use model::{CurveRecord, Horizon, ObservationTable, quarter_label};
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};

/// Margin added below the minimum and above the maximum of the value range.
pub const RANGE_MARGIN: f64 = 0.2;
/// Value range used when a table holds no value at all.
pub const EMPTY_RANGE: ValueRange = ValueRange {
    lower: 0.0,
    upper: 5.0,
};

const VALUE_AXIS_TITLE: &str = "Inflation expectations (% p.a.)";
const HORIZON_AXIS_TITLE: &str = "Horizon (quarters)";

/// Horizons shown in the overview, each with a fixed color running from dark
/// blue (short) to red (long).
pub const OVERVIEW_HORIZONS: [(u32, &str); 11] = [
    (1, "#000080"),
    (2, "#0000FF"),
    (3, "#0080FF"),
    (4, "#00FFFF"),
    (6, "#00FF80"),
    (8, "#00FF00"),
    (12, "#80FF00"),
    (16, "#FFFF00"),
    (20, "#FF8000"),
    (30, "#FF4000"),
    (40, "#FF0000"),
];

/// Qualitative palette (ColorBrewer Set1) cycled through by the comparison chart.
pub const COMPARISON_PALETTE: [&str; 9] = [
    "rgb(228,26,28)",
    "rgb(55,126,184)",
    "rgb(77,175,74)",
    "rgb(152,78,163)",
    "rgb(255,127,0)",
    "rgb(255,255,51)",
    "rgb(166,86,40)",
    "rgb(247,129,191)",
    "rgb(153,153,153)",
];

const EVOLUTION_COLOR: &str = "darkblue";

/// Range over every value of the table widened by [`RANGE_MARGIN`] on both sides.
pub fn global_value_range(table: &ObservationTable) -> ValueRange {
    let bounds = table.values().fold(None, |acc: Option<(f64, f64)>, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    });

    match bounds {
        Some((min, max)) => ValueRange::new(min - RANGE_MARGIN, max + RANGE_MARGIN),
        None => EMPTY_RANGE,
    }
}

/// Time series of the curated horizons across all dates.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn overview_chart(table: &ObservationTable) -> Figure {
    let mut figure = Figure::new(ChartLayout {
        title: Some(TitleSpec::new("Inflation expectations over time")),
        xaxis: AxisSpec::titled("Time"),
        yaxis: AxisSpec::titled(VALUE_AXIS_TITLE),
        hovermode: HoverMode::XUnified,
        height: 600,
        legend: Some(LegendSpec::horizontal_top()),
    });

    let dates: Vec<XValue> = table.dates().map(XValue::Date).collect();

    for (quarters, color) in OVERVIEW_HORIZONS {
        let Ok(horizon) = Horizon::new(quarters) else {
            continue;
        };
        let Some(values) = table.column(horizon) else {
            trace!(horizon = quarters, "Horizon not in table, skipping");
            continue;
        };
        let label = horizon.to_string();
        let hover = format!("%{{x}}<br>{}: %{{y:.3f}}%<extra></extra>", label);
        figure.add_trace(
            Trace::scatter(dates.clone(), values, TraceMode::Lines, label, LineStyle::new(color, 2.0))
                .with_hover_template(hover),
        );
    }

    debug!(traces = figure.data.len(), "Built overview chart");
    figure
}

/// One structure curve per selected date, in selection order.
///
/// An empty selection yields a figure without traces. Every selected date must
/// match a row of the table.
#[instrument(skip(table, selected_dates), fields(selected = selected_dates.len()))]
pub fn comparison_chart(
    table: &ObservationTable,
    selected_dates: &[NaiveDate],
    fixed_scale: bool,
) -> Result<Figure> {
    let mut yaxis = AxisSpec::titled(VALUE_AXIS_TITLE);
    if fixed_scale {
        yaxis = yaxis.with_range(global_value_range(table));
    }
    let mut figure = Figure::new(ChartLayout {
        title: Some(TitleSpec::new("Comparison of inflation expectation term structures")),
        xaxis: AxisSpec::titled(HORIZON_AXIS_TITLE),
        yaxis,
        hovermode: HoverMode::XUnified,
        height: 500,
        legend: None,
    });

    let horizons: Vec<XValue> = table
        .horizons()
        .iter()
        .map(|horizon| XValue::Horizon(horizon.quarters()))
        .collect();

    for (i, date) in selected_dates.iter().enumerate() {
        let row = table
            .row_for_date(*date)
            .ok_or(ComputeError::DateNotInDataset(*date))?;
        let color = COMPARISON_PALETTE[i % COMPARISON_PALETTE.len()];
        figure.add_trace(
            Trace::scatter(
                horizons.clone(),
                row.values.clone(),
                TraceMode::LinesMarkers,
                quarter_label(*date),
                LineStyle::new(color, 2.0),
            )
            .with_marker(MarkerStyle {
                size: 6,
                color: None,
            }),
        );
    }

    debug!(traces = figure.data.len(), "Built comparison chart");
    Ok(figure)
}

/// The single structure curve at `index`.
#[instrument(skip(curves), fields(curves = curves.len()))]
pub fn evolution_chart(
    curves: &[CurveRecord],
    index: usize,
    fixed_range: Option<ValueRange>,
) -> Result<Figure> {
    let curve = curves.get(index).ok_or(ComputeError::CurveIndexOutOfRange {
        index,
        len: curves.len(),
    })?;

    let mut yaxis = AxisSpec::titled(VALUE_AXIS_TITLE);
    if let Some(range) = fixed_range {
        yaxis = yaxis.with_range(range);
    }
    let mut figure = Figure::new(ChartLayout {
        title: Some(TitleSpec::new(format!("Term structure - {}", curve.quarter_label))),
        xaxis: AxisSpec::titled(HORIZON_AXIS_TITLE),
        yaxis,
        hovermode: HoverMode::X,
        height: 500,
        legend: None,
    });

    figure.add_trace(
        Trace::scatter(
            curve.horizons.iter().copied().map(XValue::Horizon).collect(),
            curve.values.clone(),
            TraceMode::LinesMarkers,
            format!("Term structure {}", curve.quarter_label),
            LineStyle::new(EVOLUTION_COLOR, 3.0),
        )
        .with_marker(MarkerStyle {
            size: 8,
            color: Some(EVOLUTION_COLOR.to_string()),
        }),
    );

    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::extract_curves;
    use model::Observation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Quarterly rows 1999Q1..2000Q4 for horizons 1, 2 and 4.
    fn two_years() -> ObservationTable {
        let dates = [
            date(1999, 3, 31),
            date(1999, 6, 30),
            date(1999, 9, 30),
            date(1999, 12, 31),
            date(2000, 3, 31),
            date(2000, 6, 30),
            date(2000, 9, 30),
            date(2000, 12, 31),
        ];
        let rows = dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let base = 1.0 + i as f64 * 0.1;
                Observation::new(*d, vec![Some(base), Some(base + 0.5), Some(base + 1.0)])
            })
            .collect();
        ObservationTable::new(
            [1, 2, 4].iter().map(|q| Horizon::new(*q).unwrap()).collect(),
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_global_value_range_margins() {
        let table = two_years();
        let range = global_value_range(&table);
        let min = table.values().fold(f64::INFINITY, f64::min);
        let max = table.values().fold(f64::NEG_INFINITY, f64::max);

        assert!(range.lower <= min);
        assert!(range.upper >= max);
        assert!((min - range.lower - RANGE_MARGIN).abs() < 1e-12);
        assert!((range.upper - max - RANGE_MARGIN).abs() < 1e-12);
    }

    #[test]
    fn test_global_value_range_without_values() {
        let table = ObservationTable::new(
            vec![Horizon::new(1).unwrap()],
            vec![Observation::new(date(1999, 3, 31), vec![None])],
        )
        .unwrap();
        assert_eq!(global_value_range(&table), EMPTY_RANGE);
    }

    #[test]
    fn test_comparison_two_dates() {
        let table = two_years();
        let figure = comparison_chart(&table, &[date(1999, 3, 31), date(2000, 12, 31)], false).unwrap();

        assert_eq!(figure.data.len(), 2);
        for trace in &figure.data {
            assert_eq!(trace.len(), 3);
            assert_eq!(
                trace.x,
                vec![XValue::Horizon(1), XValue::Horizon(2), XValue::Horizon(4)]
            );
            assert_eq!(trace.mode, TraceMode::LinesMarkers);
        }
        assert_eq!(figure.data[0].name, "1999Q1");
        assert_eq!(figure.data[1].name, "2000Q4");
        assert_eq!(figure.data[0].line.color, COMPARISON_PALETTE[0]);
        assert_eq!(figure.data[1].line.color, COMPARISON_PALETTE[1]);
        assert!(figure.layout.yaxis.range.is_none());
    }

    #[test]
    fn test_comparison_keeps_selection_order() {
        let table = two_years();
        let figure = comparison_chart(&table, &[date(2000, 12, 31), date(1999, 3, 31)], false).unwrap();
        assert_eq!(figure.data[0].name, "2000Q4");
        assert_eq!(figure.data[1].name, "1999Q1");
    }

    #[test]
    fn test_comparison_empty_selection() {
        let figure = comparison_chart(&two_years(), &[], true).unwrap();
        assert!(figure.is_empty());
    }

    #[test]
    fn test_comparison_unknown_date() {
        let result = comparison_chart(&two_years(), &[date(1999, 3, 30)], false);
        assert!(matches!(
            result,
            Err(ComputeError::DateNotInDataset(d)) if d == date(1999, 3, 30)
        ));
    }

    #[test]
    fn test_comparison_fixed_scale_and_palette_cycle() {
        let table = crate::synthetic::generate().unwrap();
        let dates: Vec<NaiveDate> = table.dates().take(10).collect();
        let figure = comparison_chart(&table, &dates, true).unwrap();

        let range = global_value_range(&table);
        assert_eq!(figure.layout.yaxis.range, Some(vec![range.lower, range.upper]));
        assert_eq!(figure.data[9].line.color, figure.data[0].line.color);
        assert_ne!(figure.data[8].line.color, figure.data[0].line.color);
    }

    #[test]
    fn test_overview_skips_absent_horizons() {
        let figure = overview_chart(&two_years());
        let names: Vec<&str> = figure.data.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["1 quarter", "2 quarters", "4 quarters"]);
        assert_eq!(figure.data[2].line.color, "#00FFFF");
        assert_eq!(figure.data[0].len(), 8);
        assert_eq!(figure.data[0].x[0], XValue::Date(date(1999, 3, 31)));
        assert_eq!(
            figure.data[1].hover_template.as_deref(),
            Some("%{x}<br>2 quarters: %{y:.3f}%<extra></extra>")
        );
    }

    #[test]
    fn test_overview_serializes_for_plotly() {
        let json = serde_json::to_value(overview_chart(&two_years())).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["line"]["width"], 2.0);
        assert!(json["data"][0]["hovertemplate"].is_string());
        assert!(json["data"][0].get("marker").is_none());
        assert_eq!(json["layout"]["legend"]["orientation"], "h");
        assert!(json["layout"]["yaxis"].get("range").is_none());
    }

    #[test]
    fn test_overview_on_full_table() {
        let figure = overview_chart(&crate::synthetic::generate().unwrap());
        assert_eq!(figure.data.len(), OVERVIEW_HORIZONS.len());
        assert_eq!(figure.data[10].name, "40 quarters");
        assert_eq!(figure.data[10].line.color, "#FF0000");
    }

    #[test]
    fn test_evolution_chart() {
        let table = two_years();
        let curves = extract_curves(&table);
        let range = global_value_range(&table);

        let figure = evolution_chart(&curves, 7, Some(range)).unwrap();
        assert_eq!(figure.data.len(), 1);
        assert_eq!(figure.data[0].name, "Term structure 2000Q4");
        assert_eq!(figure.data[0].y, curves[7].values);
        assert_eq!(figure.layout.hovermode, HoverMode::X);
        assert_eq!(figure.layout.yaxis.range, Some(vec![range.lower, range.upper]));

        let unscaled = evolution_chart(&curves, 0, None).unwrap();
        assert!(unscaled.layout.yaxis.range.is_none());
    }

    #[test]
    fn test_evolution_index_out_of_range() {
        let curves = extract_curves(&two_years());
        assert!(matches!(
            evolution_chart(&curves, 8, None),
            Err(ComputeError::CurveIndexOutOfRange { index: 8, len: 8 })
        ));
    }
}
