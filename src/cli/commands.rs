pub mod curves;
pub mod export;
pub mod render;
pub mod serve;

pub use curves::print_curves;
pub use export::export;
pub use render::render;
pub use serve::serve;

use anyhow::Result;
use compute::loader::{LoadedTable, TableSource};
use model::Country;
use std::path::PathBuf;
use tracing::warn;

use crate::config::Settings;

/// Loads the table of `country` from the configured (or overridden) data directory.
pub(crate) fn load_table(country: Country, data_dir: Option<PathBuf>) -> Result<LoadedTable> {
    let settings = Settings::load()?.with_overrides(None, data_dir);
    let source = compute::default_source(settings.data_dir);
    let loaded = source.load(country)?;
    if loaded.origin.is_synthetic() {
        warn!(country = %country, "Using synthetic sample data");
    }
    Ok(loaded)
}
