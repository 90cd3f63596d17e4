use common::{
    AxisSpec, ChartLayout, CountryDto, CurveDto, CurveMetric, CurveMetrics, DataOrigin,
    EvolutionView, ExportPayload, Figure, HoverMode, LegendSpec, LineStyle, MarkerStyle,
    ObservationRowDto, QuarterOptions, TableDto, TitleSpec, Trace, TraceMode, ValueRange, XValue,
};
use compute::cache::TableCache;
use compute::loader::FileTableSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-country tables, loaded on first use
    pub source: Arc<TableCache<FileTableSource>>,
}

impl AppState {
    pub fn new(source: TableCache<FileTableSource>) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

/// Query parameters of the comparison chart
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ComparisonQuery {
    /// Comma-separated quarter labels (e.g. `2019Q4,2020Q4`). The most recent
    /// quarters are selected when absent; an empty value selects nothing
    pub quarters: Option<String>,
    /// Pin the y-axis to the value range of the whole table
    #[serde(default)]
    pub fixed_scale: bool,
}

/// Query parameters of the evolution chart
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EvolutionQuery {
    /// Quarter label of the displayed curve; the most recent when absent
    pub quarter: Option<String>,
    /// Pin the y-axis to the value range of the whole table
    #[serde(default)]
    pub fixed_scale: bool,
}

/// Query parameters of the export endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// Comma-separated quarter labels; the whole table is exported when absent
    pub quarters: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of countries whose table is currently cached
    pub cached_countries: usize,
}

/// Outcome of a cache invalidation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CacheClearResponse {
    /// Number of cached tables that were dropped
    pub cleared: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::countries::get_countries,
        crate::handlers::curves::get_table,
        crate::handlers::curves::get_curves,
        crate::handlers::curves::get_quarters,
        crate::handlers::curves::get_value_range,
        crate::handlers::charts::get_overview_chart,
        crate::handlers::charts::get_comparison_chart,
        crate::handlers::charts::get_evolution_chart,
        crate::handlers::export::get_export,
        crate::handlers::export::get_export_csv,
        crate::handlers::cache::clear_cache,
    ),
    components(
        schemas(
            ApiResponse<Vec<CountryDto>>,
            ApiResponse<TableDto>,
            ApiResponse<Vec<CurveDto>>,
            ApiResponse<QuarterOptions>,
            ApiResponse<ValueRange>,
            ApiResponse<Figure>,
            ApiResponse<EvolutionView>,
            ApiResponse<ExportPayload>,
            ApiResponse<CacheClearResponse>,
            ErrorResponse,
            HealthResponse,
            CacheClearResponse,
            ComparisonQuery,
            EvolutionQuery,
            ExportQuery,
            CountryDto,
            DataOrigin,
            ObservationRowDto,
            TableDto,
            CurveDto,
            QuarterOptions,
            CurveMetric,
            CurveMetrics,
            EvolutionView,
            ExportPayload,
            Figure,
            Trace,
            TraceMode,
            XValue,
            LineStyle,
            MarkerStyle,
            TitleSpec,
            AxisSpec,
            HoverMode,
            LegendSpec,
            ChartLayout,
            ValueRange,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "countries", description = "Country selection endpoints"),
        (name = "curves", description = "Observation tables and structure curves"),
        (name = "charts", description = "Chart specifications"),
        (name = "export", description = "CSV export endpoints"),
        (name = "cache", description = "Table cache management"),
    ),
    info(
        title = "Inflation Curves API",
        description = "Survey inflation expectations: term structures, comparison and evolution charts, CSV export",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
