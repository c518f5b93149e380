use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::error_response};

#[derive(Error, Debug)]
pub enum AuthError {
    /// The request carried no `Authorization: Bearer` header.
    #[error("Authentication credentials were not provided.")]
    MissingCredentials,

    /// The bearer token is unknown, expired, of the wrong kind, or its owner is inactive.
    #[error("Given token not valid for any token type")]
    InvalidToken,

    /// Login with an unknown email or a wrong password.
    #[error("Invalid credentials, try again")]
    InvalidCredentials,

    /// Login attempt by a user whose `is_active` flag is cleared.
    #[error("Account disabled, contact admin")]
    AccountDisabled,

    /// Login attempt before the email verification step.
    #[error("Please verify your email")]
    EmailNotVerified,

    /// Password reset token is unknown, used or expired.
    #[error("Token is not valid, please request a new one")]
    InvalidResetToken,

    /// User is authenticated but lacks a required permission.
    ///
    /// # Fields
    /// - ID of the user who was denied
    /// - Reason logged server-side
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// # Returns
/// - 401 Unauthorized - Missing or invalid credentials of any kind
/// - 403 Forbidden - `AccessDenied`, with the reason logged at debug level
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::AccessDenied(user_id, reason) => {
                tracing::debug!("Access denied for user {}: {}", user_id, reason);
                error_response(
                    StatusCode::FORBIDDEN,
                    ErrorDto::message(
                        StatusCode::FORBIDDEN,
                        "You do not have permission to perform this action.",
                    ),
                )
            }
            err => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorDto::message(StatusCode::UNAUTHORIZED, err.to_string()),
            ),
        }
    }
}
