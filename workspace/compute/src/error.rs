use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

use crate::schema::SchemaError;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The per-country data file does not exist
    #[error("Data file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Error from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Error from Polars Series operations
    #[error("Series error: {0}")]
    Series(String),

    /// Column layout of the source file is not usable
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Table invariants violated
    #[error("Model error: {0}")]
    Model(#[from] model::ModelError),

    /// Error from date parsing
    #[error("Date error: {0}")]
    Date(String),

    /// A selected date has no row in the table
    #[error("Date {0} is not in the dataset")]
    DateNotInDataset(NaiveDate),

    /// A selected quarter label has no row in the table
    #[error("Quarter {0} is not in the dataset")]
    UnknownQuarter(String),

    /// Slider position outside the curve sequence
    #[error("Curve index {index} is out of range for {len} curves")]
    CurveIndexOutOfRange { index: usize, len: usize },

    /// Error while serializing an export
    #[error("Export error: {0}")]
    Export(String),
}

// Implement From<polars::error::PolarsError> for ComputeError
impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        match error {
            polars::error::PolarsError::NoData(_) => {
                let err = ComputeError::DataFrame(format!("No data: {}", error));
                error!(?err, "DataFrame error: No data");
                err
            }
            polars::error::PolarsError::ColumnNotFound(_) => {
                let err = ComputeError::DataFrame(format!("Column not found: {}", error));
                error!(?err, "DataFrame error: Column not found");
                err
            }
            polars::error::PolarsError::ShapeMismatch(_) => {
                let err = ComputeError::DataFrame(format!("Shape mismatch: {}", error));
                error!(?err, "DataFrame error: Shape mismatch");
                err
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                let err = ComputeError::DataFrame(format!("Schema mismatch: {}", error));
                error!(?err, "DataFrame error: Schema mismatch");
                err
            }
            polars::error::PolarsError::ComputeError(_) => {
                let err = ComputeError::DataFrame(format!("Compute error: {}", error));
                error!(?err, "DataFrame error: Compute error");
                err
            }
            polars::error::PolarsError::OutOfBounds(_) => {
                let err = ComputeError::DataFrame(format!("Out of bounds: {}", error));
                error!(?err, "DataFrame error: Out of bounds");
                err
            }
            _ => {
                let err = ComputeError::Series(format!("Series error: {}", error));
                error!(?err, "Series error");
                err
            }
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
