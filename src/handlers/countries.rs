use axum::response::Json;
use common::CountryDto;
use model::Country;
use tracing::{instrument, trace};

use crate::helpers::converters::country_to_dto;
use crate::schemas::ApiResponse;

/// List the supported countries
#[utoipa::path(
    get,
    path = "/api/v1/countries",
    tag = "countries",
    responses(
        (status = 200, description = "Countries retrieved successfully", body = ApiResponse<Vec<CountryDto>>)
    )
)]
#[instrument]
pub async fn get_countries() -> Json<ApiResponse<Vec<CountryDto>>> {
    trace!("Listing supported countries");
    Json(ApiResponse {
        data: Country::ALL.iter().copied().map(country_to_dto).collect(),
        message: "Countries retrieved successfully".to_string(),
        success: true,
    })
}
