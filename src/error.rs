use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::database::StoreError;

#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    NotFound(String),
    RateLimited(u64),
    GeofenceCheck(StoreError),
    Store(StoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::InvalidRequest(details) => {
                (StatusCode::BAD_REQUEST, "Invalid request", details)
            }
            AppError::NotFound(details) => (StatusCode::NOT_FOUND, "Not found", details),
            AppError::RateLimited(window) => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests",
                format!("Retry after {} seconds", window),
            ),
            AppError::GeofenceCheck(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to evaluate geofence",
                e.to_string(),
            ),
            AppError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error",
                e.to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
