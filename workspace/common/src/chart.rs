//! Chart specifications.
//!
//! A [`Figure`] serializes to the `{ "data": [...], "layout": {...} }` shape
//! understood by plotly.js, so a front-end can hand it to `Plotly.newPlot`
//! unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Complete chart: traces plus layout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: ChartLayout,
}

impl Figure {
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    pub fn traces(&self) -> &[Trace] {
        &self.data
    }

    /// A figure without traces renders nothing.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// X coordinate: a date on time axes, a horizon length on horizon axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum XValue {
    Date(NaiveDate),
    Horizon(u32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum TraceMode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// A scatter trace.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub x: Vec<XValue>,
    /// Y values; null leaves a gap in the line
    pub y: Vec<Option<f64>>,
    pub mode: TraceMode,
    pub name: String,
    pub line: LineStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(rename = "hovertemplate", default, skip_serializing_if = "Option::is_none")]
    pub hover_template: Option<String>,
}

impl Trace {
    pub fn scatter(
        x: Vec<XValue>,
        y: Vec<Option<f64>>,
        mode: TraceMode,
        name: impl Into<String>,
        line: LineStyle,
    ) -> Self {
        Self {
            trace_type: "scatter".to_string(),
            x,
            y,
            mode,
            name: name.into(),
            line,
            marker: None,
            hover_template: None,
        }
    }

    pub fn with_marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_hover_template(mut self, template: impl Into<String>) -> Self {
        self.hover_template = Some(template.into());
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

impl LineStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MarkerStyle {
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TitleSpec {
    pub text: String,
}

impl TitleSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AxisSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleSpec>,
    /// Fixed `[lower, upper]` range; autoscaled when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<f64>>,
}

impl AxisSpec {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(TitleSpec::new(text)),
            range: None,
        }
    }

    pub fn with_range(mut self, range: ValueRange) -> Self {
        self.range = Some(vec![range.lower, range.upper]);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum HoverMode {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "x unified")]
    XUnified,
    #[serde(rename = "closest")]
    Closest,
}

/// Legend placement; the horizontal variant sits above the plot area.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LegendSpec {
    pub orientation: String,
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}

impl LegendSpec {
    pub fn horizontal_top() -> Self {
        Self {
            orientation: "h".to_string(),
            yanchor: "bottom".to_string(),
            y: 1.02,
            xanchor: "right".to_string(),
            x: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleSpec>,
    pub xaxis: AxisSpec,
    pub yaxis: AxisSpec,
    pub hovermode: HoverMode,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendSpec>,
}

/// Closed value interval used to pin the y-axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ValueRange {
    pub lower: f64,
    pub upper: f64,
}

impl ValueRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}
