use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{
            AccessTokenDto, EmailDto, LoginDto, LoginResponseDto, PasswordResetCheckDto,
            RefreshTokenDto, SetNewPasswordDto, SignupDto, SignupResponseDto, VerifyEmailDto,
        },
    },
    server::{
        controller::extract::{Json, Path},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::auth::SignupParam,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(&state.db, &state.mailer, state.tokens, &state.app_url)
}

/// Register a new account.
///
/// Creates an unverified user and emails a 6 digit verification code.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `201 Created` - The new account
/// - `400 Bad Request` - A field broke its rules
/// - `409 Conflict` - The email is already registered
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = AUTH_TAG,
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = SignupResponseDto),
        (status = 400, description = "Invalid signup data", body = ErrorDto),
        (status = 409, description = "User already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth_service(&state)
        .signup(SignupParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_signup_dto())))
}

/// Log in with email and password.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Account summary with a fresh access and refresh token
/// - `401 Unauthorized` - Bad credentials, a disabled account or an unverified email
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponseDto),
        (status = 401, description = "Login refused", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let result = auth_service(&state)
        .login(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(result.into_dto())))
}

/// Verify an email address with its code.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - `{"message":"successful"}`
/// - `400 Bad Request` - Unknown user, wrong code, or an expired code
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    tag = AUTH_TAG,
    request_body = VerifyEmailDto,
    responses(
        (status = 200, description = "Email verified", body = MessageDto),
        (status = 400, description = "Verification failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .verify_email(&payload.email, &payload.token)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("successful"))))
}

/// Send a new verification code.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - A new code was emailed
/// - `400 Bad Request` - Unknown user or the email is already verified
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = AUTH_TAG,
    request_body = EmailDto,
    responses(
        (status = 200, description = "Verification code sent", body = MessageDto),
        (status = 400, description = "Nothing to verify", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(payload): Json<EmailDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .resend_verification(&payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("A new token has been sent to your email")),
    ))
}

/// Exchange a refresh token for a new access token.
///
/// # Access Control
/// - Public, the refresh token is the credential
///
/// # Returns
/// - `200 OK` - New access token
/// - `401 Unauthorized` - Unknown or expired refresh token
#[utoipa::path(
    post,
    path = "/api/auth/token/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "New access token", body = AccessTokenDto),
        (status = 401, description = "Invalid refresh token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = auth_service(&state).refresh(&payload.refresh).await?;

    Ok((StatusCode::OK, Json(AccessTokenDto { access })))
}

/// Revoke the presented access token.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - Token revoked
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &headers);
    let user = guard.require(&[Permission::Authenticated]).await?;

    auth_service(&state).logout(guard.token()?).await?;
    tracing::info!("User {} logged out", user.id);

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out"))))
}

/// Request a password reset link.
///
/// Always answers the same way so registered addresses cannot be discovered.
///
/// # Access Control
/// - Public
#[utoipa::path(
    post,
    path = "/api/auth/request-reset-password-email",
    tag = AUTH_TAG,
    request_body = EmailDto,
    responses(
        (status = 200, description = "Reset link sent if the account exists", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<EmailDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .request_password_reset(&payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(
            "We have sent you a link to reset your password",
        )),
    ))
}

/// Check a password reset link.
///
/// # Access Control
/// - Public, the token is the credential
///
/// # Returns
/// - `200 OK` - The token can be used to set a new password
/// - `401 Unauthorized` - Token is unknown, used or expired
#[utoipa::path(
    get,
    path = "/api/auth/password-reset/{user_id}/{token}",
    tag = AUTH_TAG,
    params(
        ("user_id" = i32, Path, description = "Account id from the reset link"),
        ("token" = String, Path, description = "Reset token from the reset link")
    ),
    responses(
        (status = 200, description = "Token is valid", body = PasswordResetCheckDto),
        (status = 401, description = "Token is not valid", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_password_reset(
    State(state): State<AppState>,
    Path((user_id, token)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .check_password_reset(user_id, &token)
        .await?;

    Ok((
        StatusCode::OK,
        Json(PasswordResetCheckDto {
            success: true,
            message: "Credentials Valid".to_string(),
            user_id,
            token,
        }),
    ))
}

/// Set a new password with a reset token.
///
/// Every session of the account is signed out.
///
/// # Access Control
/// - Public, the token is the credential
///
/// # Returns
/// - `200 OK` - Password replaced
/// - `400 Bad Request` - The password is too weak
/// - `401 Unauthorized` - Token is unknown, used or expired
#[utoipa::path(
    patch,
    path = "/api/auth/set-new-password",
    tag = AUTH_TAG,
    request_body = SetNewPasswordDto,
    responses(
        (status = 200, description = "Password replaced", body = MessageDto),
        (status = 400, description = "Invalid password", body = ErrorDto),
        (status = 401, description = "Token is not valid", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_new_password(
    State(state): State<AppState>,
    Json(payload): Json<SetNewPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .set_new_password(payload.user_id, &payload.token, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password reset success"))))
}
