use crate::handlers::{
    cache::clear_cache,
    charts::{get_comparison_chart, get_evolution_chart, get_overview_chart},
    countries::get_countries,
    curves::{get_curves, get_quarters, get_table, get_value_range},
    export::{get_export, get_export_csv},
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Default request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

/// Create application router with a custom request timeout
pub fn create_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Countries
        .route("/api/v1/countries", get(get_countries))
        // Tables and curves
        .route("/api/v1/countries/:code/table", get(get_table))
        .route("/api/v1/countries/:code/curves", get(get_curves))
        .route("/api/v1/countries/:code/quarters", get(get_quarters))
        .route("/api/v1/countries/:code/range", get(get_value_range))
        // Charts
        .route("/api/v1/countries/:code/charts/overview", get(get_overview_chart))
        .route("/api/v1/countries/:code/charts/comparison", get(get_comparison_chart))
        .route("/api/v1/countries/:code/charts/evolution", get(get_evolution_chart))
        // Export
        .route("/api/v1/countries/:code/export", get(get_export))
        .route("/api/v1/countries/:code/export.csv", get(get_export_csv))
        // Cache management
        .route("/api/v1/cache/clear", post(clear_cache))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
