pub mod cache;
pub mod charts;
pub mod countries;
pub mod curves;
pub mod export;
pub mod health;

use compute::loader::{LoadedTable, TableSource};
use model::Country;
use tracing::{debug, trace};

use crate::helpers::errors::ApiError;
use crate::schemas::AppState;

/// Resolves the country code from the path and loads (or reuses) its table.
pub(crate) fn load_country(state: &AppState, code: &str) -> Result<LoadedTable, ApiError> {
    trace!("Resolving country code {}", code);
    let country: Country = code
        .parse()
        .map_err(|_| ApiError::UnknownCountry(code.to_string()))?;
    let loaded = state.source.load(country)?;
    debug!(
        country = %country,
        rows = loaded.table.len(),
        synthetic = loaded.origin.is_synthetic(),
        "Table ready"
    );
    Ok(loaded)
}
