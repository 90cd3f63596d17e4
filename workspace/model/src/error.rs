use thiserror::Error;

/// Error types for the model crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Country code outside the supported set
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    /// Column carries the horizon prefix but cannot be parsed
    #[error("Invalid horizon column '{column}': {reason}")]
    InvalidHorizon { column: String, reason: String },

    /// Text that is not a `YYYYQn` quarter label
    #[error("Invalid quarter label: {0}")]
    InvalidQuarterLabel(String),

    /// Table rows violate the ordering or shape invariants
    #[error("Invalid observation table: {0}")]
    InvalidTable(String),
}

/// Type alias for Result with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
