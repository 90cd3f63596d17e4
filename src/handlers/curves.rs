use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{CurveDto, QuarterOptions, TableDto, ValueRange};
use compute::{charts::global_value_range, curves};
use tracing::{debug, instrument};

use crate::handlers::load_country;
use crate::helpers::converters::{curve_to_dto, loaded_table_to_dto};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Get the observation table of a country
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/table",
    tag = "curves",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
    ),
    responses(
        (status = 200, description = "Table retrieved successfully", body = ApiResponse<TableDto>),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_table(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TableDto>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;
    let message = if loaded.origin.is_synthetic() {
        "Data file unavailable, synthetic sample data returned"
    } else {
        "Table retrieved successfully"
    };

    Ok(Json(ApiResponse {
        data: loaded_table_to_dto(&loaded),
        message: message.to_string(),
        success: true,
    }))
}

/// Get the structure curves of a country, one per survey date
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/curves",
    tag = "curves",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
    ),
    responses(
        (status = 200, description = "Curves retrieved successfully", body = ApiResponse<Vec<CurveDto>>),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_curves(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CurveDto>>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;
    let records = curves::extract_curves(&loaded.table);
    debug!(curves = records.len(), "Returning structure curves");

    Ok(Json(ApiResponse {
        data: records.iter().map(curve_to_dto).collect(),
        message: "Curves retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get the selectable quarters of a country with their default selections
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/quarters",
    tag = "curves",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
    ),
    responses(
        (status = 200, description = "Quarters retrieved successfully", body = ApiResponse<QuarterOptions>),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_quarters(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<QuarterOptions>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;
    let records = curves::extract_curves(&loaded.table);

    Ok(Json(ApiResponse {
        data: QuarterOptions {
            labels: curves::quarter_labels(&records),
            default_comparison: curves::default_comparison_selection(&records),
            default_evolution_index: curves::default_evolution_index(&records),
        },
        message: "Quarters retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get the value range used to pin the y-axis of fixed-scale charts
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/range",
    tag = "curves",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
    ),
    responses(
        (status = 200, description = "Value range retrieved successfully", body = ApiResponse<ValueRange>),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_value_range(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ValueRange>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;

    Ok(Json(ApiResponse {
        data: global_value_range(&loaded.table),
        message: "Value range retrieved successfully".to_string(),
        success: true,
    }))
}
