//! Error types for survival-api
//!
//! Validator, classifier and service errors are plain typed values. Only
//! [`ApiError`] knows about HTTP; it is the single place where errors are
//! translated into status codes and `{"detail": ...}` bodies.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use survival_common::api::ErrorResponse;
use thiserror::Error;

/// Detail returned when a passenger id is unknown
pub const NOT_FOUND_DETAIL: &str = "ID de passageiro não encontrado.";

/// Detail prefix for scoring failures; the underlying cause is appended
pub const SCORING_DETAIL: &str = "Erro ao calcular a probabilidade de sobrevivência.";

/// Feature vector shape or domain violation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Número de características inválido. Esperado 8 características.")]
    InvalidLength { actual: usize },

    #[error("Características inválidas.")]
    InvalidDomain {
        name: &'static str,
        index: usize,
        value: f64,
    },
}

/// Model artifact or prediction failure
#[derive(Debug, Clone, Error)]
pub enum ScoringError {
    /// Artifact could not be fetched, read or parsed
    #[error("model artifact unavailable: {0}")]
    Artifact(String),

    /// The model rejected the input or produced an unusable output
    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Typed result of every passenger service operation
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("passenger not found: {0}")]
    NotFound(String),

    #[error("record store failure: {0}")]
    Store(#[from] survival_common::Error),
}

/// HTTP boundary error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Request body could not be decoded
    #[error("{0}")]
    InvalidBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    /// Status code and detail text for this error
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::InvalidBody(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ApiError::Service(err) => match err {
                ServiceError::InvalidInput(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
                ServiceError::Scoring(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{} {}", SCORING_DETAIL, e),
                ),
                ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_DETAIL.to_string()),
                ServiceError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(ServiceError::from(ValidationError::InvalidLength { actual: 3 })),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(ServiceError::NotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ServiceError::from(ScoringError::Prediction("boom".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(ServiceError::from(survival_common::Error::Internal("db".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::InvalidBody("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_and_detail().0, expected, "{:?}", err);
        }
    }

    #[test]
    fn test_scoring_detail_carries_cause() {
        let err = ApiError::from(ServiceError::from(ScoringError::Artifact(
            "No such file".into(),
        )));
        let (_, detail) = err.status_and_detail();
        assert!(detail.starts_with(SCORING_DETAIL));
        assert!(detail.contains("No such file"));
    }

    #[test]
    fn test_validation_details() {
        assert_eq!(
            ValidationError::InvalidLength { actual: 7 }.to_string(),
            "Número de características inválido. Esperado 8 características."
        );
        assert_eq!(
            ValidationError::InvalidDomain { name: "pclass", index: 4, value: 5.0 }.to_string(),
            "Características inválidas."
        );
    }
}
