use crate::server::{
    data::auth::{AuthTokenRepository, EmailVerificationRepository, PasswordResetRepository},
    error::AppError,
    model::auth::{IssueTokenParam, TokenKind},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod auth_token;
mod email_verification;
mod password_reset;
