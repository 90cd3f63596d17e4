use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{EvolutionView, Figure};
use compute::{charts, curves};
use tracing::{debug, instrument};

use crate::handlers::load_country;
use crate::helpers::converters::split_quarters;
use crate::helpers::errors::ApiError;
use crate::schemas::{ApiResponse, AppState, ComparisonQuery, ErrorResponse, EvolutionQuery};

/// Time series of the curated horizons
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/charts/overview",
    tag = "charts",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
    ),
    responses(
        (status = 200, description = "Overview chart built successfully", body = ApiResponse<Figure>),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_overview_chart(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Figure>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;

    Ok(Json(ApiResponse {
        data: charts::overview_chart(&loaded.table),
        message: "Overview chart built successfully".to_string(),
        success: true,
    }))
}

/// Structure curves of the selected quarters side by side
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/charts/comparison",
    tag = "charts",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
        ComparisonQuery
    ),
    responses(
        (status = 200, description = "Comparison chart built successfully", body = ApiResponse<Figure>),
        (status = 400, description = "Unknown quarter selected", body = ErrorResponse),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_comparison_chart(
    Path(code): Path<String>,
    Query(query): Query<ComparisonQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Figure>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;

    let labels = match &query.quarters {
        Some(raw) => split_quarters(raw),
        None => curves::default_comparison_selection(&curves::extract_curves(&loaded.table)),
    };
    debug!(?labels, fixed_scale = query.fixed_scale, "Building comparison chart");

    let figure = curves::resolve_quarters(&loaded.table, labels.as_slice())
        .and_then(|dates| charts::comparison_chart(&loaded.table, &dates, query.fixed_scale))
        .map_err(ApiError::from)?;

    let message = if figure.is_empty() {
        "No quarters selected"
    } else {
        "Comparison chart built successfully"
    };

    Ok(Json(ApiResponse {
        data: figure,
        message: message.to_string(),
        success: true,
    }))
}

/// A single structure curve with its headline metrics
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/charts/evolution",
    tag = "charts",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
        EvolutionQuery
    ),
    responses(
        (status = 200, description = "Evolution chart built successfully", body = ApiResponse<EvolutionView>),
        (status = 400, description = "Unknown quarter selected", body = ErrorResponse),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_evolution_chart(
    Path(code): Path<String>,
    Query(query): Query<EvolutionQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<EvolutionView>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;
    let records = curves::extract_curves(&loaded.table);

    let index = match query.quarter.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => {
            curves::find_curve_index(&records, label).map_err(ApiError::from)?
        }
        _ => curves::default_evolution_index(&records),
    };
    let fixed_range = query
        .fixed_scale
        .then(|| charts::global_value_range(&loaded.table));

    let figure = charts::evolution_chart(&records, index, fixed_range).map_err(ApiError::from)?;
    let metrics = curves::curve_metrics(&records[index]);
    debug!(index, quarter = %metrics.quarter_label, "Built evolution chart");

    Ok(Json(ApiResponse {
        data: EvolutionView {
            index,
            figure,
            metrics,
        },
        message: "Evolution chart built successfully".to_string(),
        success: true,
    }))
}
