use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use common::ExportPayload;
use compute::loader::LoadedTable;
use compute::{curves, export};
use tracing::{debug, instrument};

use crate::handlers::load_country;
use crate::helpers::converters::split_quarters;
use crate::helpers::errors::ApiError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, ExportQuery};

/// Full export without a selection, otherwise the rows of the selected quarters.
fn build_export(loaded: &LoadedTable, quarters: Option<&str>) -> Result<ExportPayload, ApiError> {
    let payload = match quarters {
        None => export::export_table(&loaded.table)?,
        Some(raw) => {
            let labels = split_quarters(raw);
            let dates = curves::resolve_quarters(&loaded.table, labels.as_slice())?;
            export::export_selection(&loaded.table, &dates)?
        }
    };
    debug!(file = %payload.file_name, rows = payload.row_count, "Export prepared");
    Ok(payload)
}

/// Export the table (or selected quarters) as a base64 CSV payload
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/export",
    tag = "export",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
        ExportQuery
    ),
    responses(
        (status = 200, description = "Export created successfully", body = ApiResponse<ExportPayload>),
        (status = 400, description = "Unknown quarter selected", body = ErrorResponse),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Export failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_export(
    Path(code): Path<String>,
    Query(query): Query<ExportQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ExportPayload>>, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;
    let payload = build_export(&loaded, query.quarters.as_deref())?;

    Ok(Json(ApiResponse {
        data: payload,
        message: "Export created successfully".to_string(),
        success: true,
    }))
}

/// Download the table (or selected quarters) as a CSV file
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/export.csv",
    tag = "export",
    params(
        ("code" = String, Path, description = "Country code (de, es, ez, fr, it, nl)"),
        ExportQuery
    ),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 400, description = "Unknown quarter selected", body = ErrorResponse),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 500, description = "Export failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_export_csv(
    Path(code): Path<String>,
    Query(query): Query<ExportQuery>,
    State(state): State<AppState>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let loaded = load_country(&state, &code)?;
    let payload = build_export(&loaded, query.quarters.as_deref())?;
    let csv = export::decode_payload(&payload).map_err(ApiError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", payload.mime_type)),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", payload.file_name),
            ),
        ],
        csv,
    )
        .into_response())
}
