//! Rendering of chart specifications through the plotly crate.

use common::{AxisSpec, ChartLayout, Figure, HoverMode, LegendSpec, Trace, TraceMode};
use plotly::common::{Anchor, Line, Marker, Mode, Orientation, Title};
use plotly::layout::{Axis, HoverMode as PlotHoverMode, Legend};
use plotly::{Layout, Plot, Scatter};

fn mode(mode: TraceMode) -> Mode {
    match mode {
        TraceMode::Lines => Mode::Lines,
        TraceMode::Markers => Mode::Markers,
        TraceMode::LinesMarkers => Mode::LinesMarkers,
    }
}

fn hover_mode(mode: HoverMode) -> PlotHoverMode {
    match mode {
        HoverMode::X => PlotHoverMode::X,
        HoverMode::XUnified => PlotHoverMode::XUnified,
        HoverMode::Closest => PlotHoverMode::Closest,
    }
}

fn anchor(value: &str) -> Anchor {
    match value {
        "top" => Anchor::Top,
        "bottom" => Anchor::Bottom,
        "left" => Anchor::Left,
        "right" => Anchor::Right,
        "center" => Anchor::Center,
        "middle" => Anchor::Middle,
        _ => Anchor::Auto,
    }
}

fn axis(spec: &AxisSpec) -> Axis {
    let mut axis = Axis::new();
    if let Some(title) = &spec.title {
        axis = axis.title(Title::with_text(&title.text));
    }
    if let Some(range) = &spec.range {
        axis = axis.range(range.clone());
    }
    axis
}

fn legend(spec: &LegendSpec) -> Legend {
    let orientation = if spec.orientation == "h" {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    Legend::new()
        .orientation(orientation)
        .y_anchor(anchor(&spec.yanchor))
        .y(spec.y)
        .x_anchor(anchor(&spec.xanchor))
        .x(spec.x)
}

fn layout(spec: &ChartLayout) -> Layout {
    let mut layout = Layout::new()
        .x_axis(axis(&spec.xaxis))
        .y_axis(axis(&spec.yaxis))
        .hover_mode(hover_mode(spec.hovermode))
        .height(spec.height as usize);
    if let Some(title) = &spec.title {
        layout = layout.title(Title::with_text(&title.text));
    }
    if let Some(legend_spec) = &spec.legend {
        layout = layout.legend(legend(legend_spec));
    }
    layout
}

fn scatter(trace: &Trace) -> Box<Scatter<common::XValue, Option<f64>>> {
    let mut scatter = Scatter::new(trace.x.clone(), trace.y.clone())
        .mode(mode(trace.mode))
        .name(&trace.name)
        .line(Line::new().color(trace.line.color.clone()).width(trace.line.width));
    if let Some(marker) = &trace.marker {
        let mut plot_marker = Marker::new().size(marker.size as usize);
        if let Some(color) = &marker.color {
            plot_marker = plot_marker.color(color.clone());
        }
        scatter = scatter.marker(plot_marker);
    }
    if let Some(template) = &trace.hover_template {
        scatter = scatter.hover_template(template);
    }
    scatter
}

/// Converts a figure into a plotly plot.
pub fn to_plot(figure: &Figure) -> Plot {
    let mut plot = Plot::new();
    for trace in &figure.data {
        plot.add_trace(scatter(trace));
    }
    plot.set_layout(layout(&figure.layout));
    plot
}

/// Standalone HTML page showing the figure.
pub fn to_html(figure: &Figure) -> String {
    to_plot(figure).to_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{comparison_chart, overview_chart};

    #[test]
    fn test_render_overview() {
        let table = crate::synthetic::generate().unwrap();
        let html = to_html(&overview_chart(&table));
        assert!(html.contains("Inflation expectations over time"));
        assert!(html.contains("40 quarters"));
    }

    #[test]
    fn test_render_empty_figure() {
        let table = crate::synthetic::generate().unwrap();
        let figure = comparison_chart(&table, &[], false).unwrap();
        let html = to_html(&figure);
        assert!(html.contains("Comparison of inflation expectation term structures"));
    }
}
