use anyhow::Result;
use compute::{charts, curves, render as html};
use model::Country;
use std::path::{Path, PathBuf};
use tracing::info;

use super::load_table;
use crate::cli::View;

/// Renders one chart of `country` to a standalone HTML file.
pub fn render(
    country: Country,
    view: View,
    quarters: &[String],
    quarter: Option<&str>,
    fixed_scale: bool,
    output: &Path,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let loaded = load_table(country, data_dir)?;
    let table = &loaded.table;

    let figure = match view {
        View::Overview => charts::overview_chart(table),
        View::Comparison => {
            let records = curves::extract_curves(table);
            let labels = if quarters.is_empty() {
                curves::default_comparison_selection(&records)
            } else {
                quarters.to_vec()
            };
            let dates = curves::resolve_quarters(table, labels.as_slice())?;
            charts::comparison_chart(table, &dates, fixed_scale)?
        }
        View::Evolution => {
            let records = curves::extract_curves(table);
            let index = match quarter {
                Some(label) => curves::find_curve_index(&records, label)?,
                None => curves::default_evolution_index(&records),
            };
            let range = fixed_scale.then(|| charts::global_value_range(table));
            charts::evolution_chart(&records, index, range)?
        }
    };

    std::fs::write(output, html::to_html(&figure))?;
    info!("Rendered {:?} chart of {} to {}", view, country.name(), output.display());
    Ok(())
}
