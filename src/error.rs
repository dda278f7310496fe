use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::backend::BackendError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorObject,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(&'static str, String),
    Forbidden(&'static str, String),
    BadRequest(&'static str, String),
    NotFound(&'static str, String),
    Conflict(&'static str, String),
    BadGateway(&'static str, String),
    Internal(String),
}

impl ApiError {
    pub fn session_expired() -> Self {
        ApiError::Unauthorized("SESSION_EXPIRED", "Session expired".into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden("FORBIDDEN", message.into())
    }

    pub fn invalid_transition(from: &str, to: &str) -> Self {
        ApiError::Conflict(
            "INVALID_TRANSITION",
            format!("appointment cannot move from {from} to {to}"),
        )
    }

    fn to_error_response(code: &str, message: &str) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: ErrorObject {
                code: code.to_string(),
                message: message.to_string(),
            },
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(code, msg) => {
                (StatusCode::UNAUTHORIZED, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Forbidden(code, msg) => {
                (StatusCode::FORBIDDEN, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::BadRequest(code, msg) => {
                (StatusCode::BAD_REQUEST, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::NotFound(code, msg) => {
                (StatusCode::NOT_FOUND, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Conflict(code, msg) => {
                (StatusCode::CONFLICT, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::BadGateway(code, msg) => {
                (StatusCode::BAD_GATEWAY, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::to_error_response("INTERNAL", &msg),
            )
                .into_response(),
        }
    }
}

/// Backend failures surface with their own status where that is meaningful
/// to the panel user; everything transport-shaped becomes BACKEND_UNAVAILABLE.
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { status: 401, .. } => ApiError::session_expired(),
            BackendError::Status { status: 403, message } => {
                ApiError::Forbidden("FORBIDDEN", message)
            }
            BackendError::Status { status: 404, message } => {
                ApiError::NotFound("NOT_FOUND", message)
            }
            BackendError::Status { status, message } if (400..500).contains(&status) => {
                ApiError::BadRequest("BACKEND_REJECTED", message)
            }
            BackendError::Status { status, message } => {
                ApiError::BadGateway("BACKEND_UNAVAILABLE", format!("backend {status}: {message}"))
            }
            BackendError::Transport(e) => {
                ApiError::BadGateway("BACKEND_UNAVAILABLE", format!("backend unreachable: {e}"))
            }
            BackendError::Decode(msg) => {
                ApiError::Internal(format!("backend response decode error: {msg}"))
            }
        }
    }
}
