use anyhow::Result;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{Settings, initialize_app_state};
use crate::router::create_router_with_timeout;

pub async fn serve(bind_address: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    trace!("Entering serve function");
    info!("Inflation curves service starting up");

    let settings = match Settings::load() {
        Ok(settings) => settings.with_overrides(bind_address, data_dir),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    debug!("Bind address: {}", settings.bind_address);
    debug!("Data directory: {}", settings.data_dir.display());

    // Initialize application state
    trace!("Initializing application state");
    let state = initialize_app_state(&settings);

    // Create router
    trace!("Creating application router");
    let app = create_router_with_timeout(state, settings.request_timeout());
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", settings.bind_address);
    let listener = match TcpListener::bind(&settings.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", settings.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", settings.bind_address, e);
            return Err(e.into());
        }
    };

    info!("Inflation curves API running on http://{}", settings.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", settings.bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
