//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.
//!
//! Every response body has the `ErrorDto` shape: a status code, a flat error string
//! and a payload mapping the failing field (or `error`) to its messages.

pub mod auth;
pub mod config;
pub mod internal;
pub mod validation;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError,
        validation::ValidationError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. Domain-specific errors like `AuthError` and `ValidationError`
/// handle their own response mapping, while generic variants provide standard HTTP
/// status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// A request field failed validation. Results in 400 Bad Request.
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// Unexpected internal state. Results in 500 with a generic message.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Filesystem error while storing or removing media.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed multipart body. Results in 400 Bad Request.
    #[error(transparent)]
    MultipartErr(#[from] axum::extract::multipart::MultipartError),

    /// JSON body that could not be read or deserialized.
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// Path segment that could not be deserialized.
    #[error(transparent)]
    PathRejection(#[from] PathRejection),

    /// Query string that could not be deserialized.
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Resource not found error. Results in 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error. Results in 400 Bad Request.
    #[error("{0}")]
    BadRequest(String),

    /// Authenticated caller is not allowed to touch the resource. Results in 403.
    #[error("{0}")]
    Forbidden(String),

    /// Uniqueness conflict. Results in 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// The provided message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl ErrorDto {
    /// Builds the body for an error that is not tied to a single field.
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status_code: status.as_u16(),
            payload: json!({ "error": [message] }),
            error: message,
        }
    }

    /// Builds the body for a failed field.
    pub fn field(status: StatusCode, field: &str, message: &str) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert(field.to_string(), json!([message]));

        Self {
            status_code: status.as_u16(),
            error: format!("'{}': {}", field, message),
            payload: serde_json::Value::Object(payload),
        }
    }

    fn internal() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            error: "Internal server error".to_string(),
            payload: json!({ "detail": "Internal server error" }),
        }
    }
}

/// Responds with `status` and an `ErrorDto` body.
pub(crate) fn error_response(status: StatusCode, body: ErrorDto) -> Response {
    (status, Json(body)).into_response()
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`, `ValidationErr` and `MultipartErr`
/// - 403 Forbidden - For `Forbidden`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - 500 Internal Server Error - For all other error types (DbErr, IoErr, etc.)
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::ValidationErr(err) => err.into_response(),
            Self::MultipartErr(err) => {
                tracing::debug!("Rejected multipart body: {}", err);
                error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorDto::message(StatusCode::BAD_REQUEST, err.body_text()),
                )
            }
            Self::JsonRejection(rejection) => {
                rejection_response(rejection.status(), rejection.body_text())
            }
            Self::PathRejection(rejection) => {
                rejection_response(rejection.status(), rejection.body_text())
            }
            Self::QueryRejection(rejection) => {
                rejection_response(rejection.status(), rejection.body_text())
            }
            Self::NotFound(msg) => error_response(
                StatusCode::NOT_FOUND,
                ErrorDto::message(StatusCode::NOT_FOUND, msg),
            ),
            Self::BadRequest(msg) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorDto::message(StatusCode::BAD_REQUEST, msg),
            ),
            Self::Forbidden(msg) => error_response(
                StatusCode::FORBIDDEN,
                ErrorDto::message(StatusCode::FORBIDDEN, msg),
            ),
            Self::Conflict(msg) => error_response(
                StatusCode::CONFLICT,
                ErrorDto::message(StatusCode::CONFLICT, msg),
            ),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                InternalServerError(msg).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Responds to an extractor rejection.
///
/// Deserialization failures (422 from axum) become 400. A missing JSON field is
/// reported against that field. A rejection caused by the server itself, like
/// missing path params on a route, is a 500.
fn rejection_response(status: StatusCode, body_text: String) -> Response {
    if status.is_server_error() {
        return InternalServerError(body_text).into_response();
    }

    tracing::debug!("Rejected request: {}", body_text);
    let status = if status == StatusCode::UNPROCESSABLE_ENTITY {
        StatusCode::BAD_REQUEST
    } else {
        status
    };

    let body = match missing_field(&body_text) {
        Some(field) => ErrorDto::field(status, field, "This field is required."),
        None => ErrorDto::message(status, body_text),
    };

    error_response(status, body)
}

/// Name of the field in serde's "missing field `name`" message.
fn missing_field(body_text: &str) -> Option<&str> {
    let start = body_text.find("missing field `")? + "missing field `".len();
    let len = body_text[start..].find('`')?;

    Some(&body_text[start..start + len])
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" body so
/// implementation details never reach the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, ErrorDto::internal())
    }
}
