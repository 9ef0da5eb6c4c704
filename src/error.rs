//! Typed errors and HTTP mapping.

use crate::validation::ValidationState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("bad request: {0}")]
    BadRequest(ValidationState),
    #[error("unprocessable: {0}")]
    Unprocessable(ValidationState),
    #[error("save failed: {0}")]
    SaveFailed(ValidationState),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(ValidationState::with_error(message))
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        AppError::Unprocessable(ValidationState::with_error(message))
    }

    pub fn save_failed(message: impl Into<String>) -> Self {
        AppError::SaveFailed(ValidationState::with_error(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, state) = match self {
            AppError::BadRequest(state) => (StatusCode::BAD_REQUEST, state),
            AppError::Unprocessable(state) => (StatusCode::UNPROCESSABLE_ENTITY, state),
            AppError::SaveFailed(state) => {
                tracing::warn!(errors = %state, "persistence reported no change");
                (StatusCode::INTERNAL_SERVER_ERROR, state)
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ValidationState::with_error("configuration error"),
                )
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ValidationState::with_error("database error"),
                )
            }
        };
        (status, Json(state)).into_response()
    }
}
