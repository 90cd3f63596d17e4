use anyhow::Result;
use compute::{curves, export as csv_export};
use model::{Country, Observation};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::load_table;

/// Writes the table of `country` (or the selected quarters) as CSV.
pub fn export(
    country: Country,
    quarters: &[String],
    output: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let loaded = load_table(country, data_dir)?;
    let table = &loaded.table;

    let rows: Vec<&Observation> = if quarters.is_empty() {
        table.rows().iter().collect()
    } else {
        let dates = curves::resolve_quarters(table, quarters)?;
        table.select_dates(&dates)
    };
    debug!(rows = rows.len(), "Rows selected for export");

    let csv = csv_export::to_csv(table, &rows)?;
    match output {
        Some(path) => {
            std::fs::write(path, &csv)?;
            info!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            std::io::stdout().write_all(csv.as_bytes())?;
        }
    }
    Ok(())
}
