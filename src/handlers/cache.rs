use axum::{extract::State, response::Json};
use tracing::{info, instrument};

use crate::schemas::{ApiResponse, AppState, CacheClearResponse};

/// Drop every cached table so the next request reloads from disk
#[utoipa::path(
    post,
    path = "/api/v1/cache/clear",
    tag = "cache",
    responses(
        (status = 200, description = "Cache cleared", body = ApiResponse<CacheClearResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn clear_cache(State(state): State<AppState>) -> Json<ApiResponse<CacheClearResponse>> {
    let cleared = state.source.cache_size();
    state.source.clear_cache();
    info!(cleared, "Table cache cleared");

    Json(ApiResponse {
        data: CacheClearResponse { cleared },
        message: "Cache cleared successfully".to_string(),
        success: true,
    })
}
