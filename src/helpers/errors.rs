use axum::{http::StatusCode, response::Json};
use compute::error::ComputeError;
use thiserror::Error;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

/// Failures surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The country code in the path is not supported
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// Error from the compute layer
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

impl ApiError {
    /// HTTP status and machine-readable code of the error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::UnknownCountry(_) => (StatusCode::NOT_FOUND, "UNKNOWN_COUNTRY"),
            ApiError::Compute(ComputeError::UnknownQuarter(_)) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_QUARTER")
            }
            ApiError::Compute(ComputeError::DateNotInDataset(_)) => {
                (StatusCode::BAD_REQUEST, "DATE_NOT_IN_DATASET")
            }
            ApiError::Compute(ComputeError::CurveIndexOutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, "CURVE_INDEX_OUT_OF_RANGE")
            }
            ApiError::Compute(ComputeError::Export(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED")
            }
            ApiError::Compute(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<ApiError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: ApiError) -> Self {
        let (status, code) = err.status_and_code();
        if status.is_server_error() {
            error!(code, "Request failed: {}", err);
        } else {
            warn!(code, "Request rejected: {}", err);
        }
        (
            status,
            Json(ErrorResponse {
                error: err.to_string(),
                code: code.to_string(),
                success: false,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::UnknownCountry("xx".into()), StatusCode::NOT_FOUND, "UNKNOWN_COUNTRY"),
            (
                ComputeError::UnknownQuarter("1800Q1".into()).into(),
                StatusCode::BAD_REQUEST,
                "UNKNOWN_QUARTER",
            ),
            (
                ComputeError::DateNotInDataset(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()).into(),
                StatusCode::BAD_REQUEST,
                "DATE_NOT_IN_DATASET",
            ),
            (
                ComputeError::CurveIndexOutOfRange { index: 3, len: 2 }.into(),
                StatusCode::BAD_REQUEST,
                "CURVE_INDEX_OUT_OF_RANGE",
            ),
            (
                ComputeError::Export("broken".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXPORT_FAILED",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn test_error_response_body() {
        let (status, Json(body)) =
            <(StatusCode, Json<ErrorResponse>)>::from(ApiError::UnknownCountry("xx".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "UNKNOWN_COUNTRY");
        assert_eq!(body.error, "Unknown country: xx");
        assert!(!body.success);
    }
}
