//! Deterministic sample dataset used when a country's data file cannot be loaded.

use chrono::NaiveDate;
use model::observation::round_value;
use model::{Horizon, Observation, ObservationTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// RNG seed; fixed so every fallback produces the same table.
pub const SEED: u64 = 42;
/// First year of the series. Only its December quarter is included.
pub const START_YEAR: i32 = 1989;
/// Last year of the series.
pub const END_YEAR: i32 = 2025;

const BASE_LEVEL: f64 = 2.0;
const CYCLE_AMPLITUDE: f64 = 0.5;
const HORIZON_STEP: f64 = 0.01;
const NOISE_SD: f64 = 0.2;
const FLOOR: f64 = 0.5;

/// Quarter-end dates from December 1989 through December 2025.
pub fn quarter_end_dates() -> Vec<NaiveDate> {
    (START_YEAR..=END_YEAR)
        .flat_map(|year| [(3, 31), (6, 30), (9, 30), (12, 31)].map(|(m, d)| (year, m, d)))
        .filter(|(year, month, _)| !(*year == START_YEAR && *month < 12))
        .filter_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

/// Standard normal sample via the Box-Muller transform.
fn standard_normal(rng: &mut StdRng) -> f64 {
    // 1 - u keeps the logarithm argument in (0, 1]
    let u1: f64 = 1.0 - rng.r#gen::<f64>();
    let u2: f64 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Generates the sample table: a shared sinusoidal trend over two full cycles,
/// a small per-horizon offset and Gaussian noise, floored at 0.5.
#[instrument]
pub fn generate() -> Result<ObservationTable> {
    let dates = quarter_end_dates();
    let n = dates.len();
    let mut rng = StdRng::seed_from_u64(SEED);

    let trend: Vec<f64> = (0..n)
        .map(|i| {
            let t = if n > 1 {
                4.0 * PI * i as f64 / (n - 1) as f64
            } else {
                0.0
            };
            BASE_LEVEL + CYCLE_AMPLITUDE * t.sin()
        })
        .collect();

    let horizons: Vec<Horizon> = Horizon::all().collect();

    // Column-major generation: all dates of horizon 1, then horizon 2, ...
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(horizons.len());
    for horizon in &horizons {
        let offset = (horizon.quarters() - 1) as f64 * HORIZON_STEP;
        let column = trend
            .iter()
            .map(|base| {
                let noise = NOISE_SD * standard_normal(&mut rng);
                round_value((base + offset + noise).max(FLOOR))
            })
            .collect();
        columns.push(column);
    }

    let rows: Vec<Observation> = dates
        .iter()
        .enumerate()
        .map(|(i, date)| Observation::new(*date, columns.iter().map(|column| Some(column[i])).collect()))
        .collect();

    debug!(rows = rows.len(), horizons = horizons.len(), "Generated synthetic dataset");

    ObservationTable::new(horizons, rows).map_err(ComputeError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_quarter_end_dates() {
        let dates = quarter_end_dates();
        assert_eq!(dates.len(), 145);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(1989, 12, 31).unwrap());
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(1990, 3, 31).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(1990, 6, 30).unwrap());
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(1990, 9, 30).unwrap());
        assert_eq!(*dates.last().unwrap(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = generate().unwrap();
        let second = generate().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_shape_and_floor() {
        let table = generate().unwrap();
        assert_eq!(table.len(), 145);
        assert_eq!(table.horizons().len(), 40);
        assert_eq!(table.horizons()[0].quarters(), 1);
        assert_eq!(table.horizons()[39].quarters(), 40);
        assert!(table.rows().iter().all(|row| row.values.iter().all(Option::is_some)));
        assert!(table.values().all(|value| value >= FLOOR));
        // Values stay around the trend level
        assert!(table.values().all(|value| value < 5.0));
        assert!(table.dates().all(|date| date.year() >= START_YEAR && date.year() <= END_YEAR));
    }

    #[test]
    fn test_values_are_rounded() {
        let table = generate().unwrap();
        assert!(table.values().all(|value| round_value(value) == value));
    }
}
