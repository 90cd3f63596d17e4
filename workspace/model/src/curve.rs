use chrono::NaiveDate;
use serde::Serialize;

use crate::horizon::Horizon;
use crate::observation::Observation;
use crate::quarter::quarter_label;

/// Structure curve of one survey date: expectation values across all horizons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveRecord {
    pub date: NaiveDate,
    pub quarter_label: String,
    /// Horizon lengths in quarters, ascending.
    pub horizons: Vec<u32>,
    /// Values aligned with `horizons`; `None` where the survey has no value.
    pub values: Vec<Option<f64>>,
}

impl CurveRecord {
    pub fn from_observation(horizons: &[Horizon], observation: &Observation) -> Self {
        Self {
            date: observation.time,
            quarter_label: quarter_label(observation.time),
            horizons: horizons.iter().map(Horizon::quarters).collect(),
            values: observation.values.clone(),
        }
    }

    /// Value at the given horizon length, if the curve covers it.
    pub fn value_at(&self, quarters: u32) -> Option<f64> {
        self.horizons
            .iter()
            .position(|h| *h == quarters)
            .and_then(|index| self.values[index])
    }

    pub fn len(&self) -> usize {
        self.horizons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horizons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_from_observation() {
        let horizons = vec![Horizon::new(1).unwrap(), Horizon::new(4).unwrap()];
        let observation = Observation::new(
            NaiveDate::from_ymd_opt(2021, 9, 30).unwrap(),
            vec![Some(1.5), None],
        );

        let curve = CurveRecord::from_observation(&horizons, &observation);
        assert_eq!(curve.quarter_label, "2021Q3");
        assert_eq!(curve.horizons, vec![1, 4]);
        assert_eq!(curve.value_at(1), Some(1.5));
        assert_eq!(curve.value_at(4), None);
        assert_eq!(curve.value_at(8), None);
        assert_eq!(curve.len(), 2);
    }
}
