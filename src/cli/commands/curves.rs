use anyhow::Result;
use compute::curves;
use model::Country;
use std::path::PathBuf;

use super::load_table;

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

/// Prints one line per structure curve with its short, medium and long term values.
pub fn print_curves(country: Country, data_dir: Option<PathBuf>) -> Result<()> {
    let loaded = load_table(country, data_dir)?;
    let records = curves::extract_curves(&loaded.table);

    println!("{} ({} curves)", country.name(), records.len());
    for record in &records {
        let metrics = curves::curve_metrics(record);
        println!(
            "{}  {}={}  {}={}  {}={}",
            metrics.quarter_label,
            metrics.short_term.label,
            format_value(metrics.short_term.value),
            metrics.medium_term.label,
            format_value(metrics.medium_term.value),
            metrics.long_term.label,
            format_value(metrics.long_term.value),
        );
    }
    Ok(())
}
