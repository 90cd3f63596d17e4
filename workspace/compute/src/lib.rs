pub mod cache;
pub mod charts;
pub mod curves;
pub mod error;
pub mod export;
pub mod loader;
pub mod render;
pub mod schema;
pub mod synthetic;

use std::path::PathBuf;

use cache::TableCache;
use loader::FileTableSource;

/// Returns the default pre-configured table source: per-country CSV files under
/// `data_dir`, each loaded once and kept until the cache is cleared.
pub fn default_source(data_dir: impl Into<PathBuf>) -> TableCache<FileTableSource> {
    TableCache::new(FileTableSource::new(data_dir))
}
