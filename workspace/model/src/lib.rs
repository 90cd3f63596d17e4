//! Domain model of the survey inflation-expectation term structures.
//!
//! An [`ObservationTable`] holds one row per survey date and one value per
//! forecast [`Horizon`]; [`CurveRecord`]s are read-only projections of its rows.

pub mod country;
pub mod curve;
pub mod error;
pub mod horizon;
pub mod observation;
pub mod quarter;

pub use country::Country;
pub use curve::CurveRecord;
pub use error::{ModelError, Result};
pub use horizon::Horizon;
pub use observation::{Observation, ObservationTable};
pub use quarter::{QuarterLabel, quarter_label};

// Re-export tracing for use in this crate
pub use tracing;
