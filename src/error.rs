//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic message reported for every field validation failure.
pub const VALIDATION_ERRORS: &str = "validation errors";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("validation: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    /// The uniform validation failure: a one-element error list.
    pub fn validation() -> Self {
        AppError::Validation(vec![VALIDATION_ERRORS.to_string()])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Body for 404 responses: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body for 400 responses: always a list, even for a single error.
#[derive(Serialize)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        match self {
            AppError::NotFound(message) => (status, Json(ErrorBody { error: message })).into_response(),
            AppError::Db(sqlx::Error::RowNotFound) => (
                status,
                Json(ErrorBody {
                    error: "not found".into(),
                }),
            )
                .into_response(),
            AppError::Validation(errors) => (status, Json(ErrorsBody { errors })).into_response(),
            other => (
                status,
                Json(ErrorsBody {
                    errors: vec![other.to_string()],
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_a_single_generic_message() {
        match AppError::validation() {
            AppError::Validation(errors) => assert_eq!(errors, vec!["validation errors".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::NotFound("Hero not found".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::validation().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("bad json".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Db(sqlx::Error::RowNotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Db(sqlx::Error::PoolTimedOut).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Internal("lock".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
