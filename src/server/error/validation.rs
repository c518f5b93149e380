use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::error_response};

/// A single request field failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("'{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Validation failure on a required field that was left out.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "This field is required.")
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorDto::field(StatusCode::BAD_REQUEST, &self.field, &self.message),
        )
    }
}
