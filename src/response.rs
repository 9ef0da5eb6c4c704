//! Success response helpers. Payloads are bare JSON, no envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Body of every successful create.
pub const CREATED_MESSAGE: &str = "Successfully created";

pub fn success_one<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

pub fn success_created(status: StatusCode) -> Response {
    (status, Json(CREATED_MESSAGE)).into_response()
}

/// Also returned when the target does not exist.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
