use chrono::{DateTime, Utc};

use crate::{
    model::auth::{LoginResponseDto, SignupDto, TokensDto},
    server::{
        error::AppError,
        model::{user::User, Choice},
    },
};

/// Length of generated bearer tokens.
pub const BEARER_TOKEN_LENGTH: usize = 40;
/// Length of password reset tokens.
pub const RESET_TOKEN_LENGTH: usize = 32;
/// Length of numeric email verification codes.
pub const VERIFICATION_TOKEN_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl Choice for TokenKind {
    const ALL: &'static [Self] = &[Self::Access, Self::Refresh];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "ACCESS",
            Self::Refresh => "REFRESH",
        }
    }
}

/// Stored bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    pub id: i32,
    pub token: String,
    pub user_id: i32,
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn from_entity(entity: entity::auth_token::Model) -> Result<Self, AppError> {
        Ok(Self {
            kind: TokenKind::from_column("kind", &entity.kind)?,
            id: entity.id,
            token: entity.token,
            user_id: entity.user_id,
            expires_at: entity.expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// New bearer token row.
#[derive(Debug, Clone)]
pub struct IssueTokenParam {
    pub user_id: i32,
    pub kind: TokenKind,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Access and refresh token handed out at login.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn into_dto(self) -> TokensDto {
        TokensDto {
            access: self.access,
            refresh: self.refresh,
        }
    }
}

/// Pending or completed email verification of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailVerification {
    pub user_id: i32,
    pub token: String,
    pub token_expiry: DateTime<Utc>,
    pub is_verified: bool,
}

impl EmailVerification {
    pub fn from_entity(entity: entity::email_verification::Model) -> Self {
        Self {
            user_id: entity.user_id,
            token: entity.token,
            token_expiry: entity.token_expiry,
            is_verified: entity.is_verified,
        }
    }
}

/// One-time password reset token.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordReset {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn from_entity(entity: entity::password_reset::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            token: entity.token,
            used: entity.used,
            expires_at: entity.expires_at,
        }
    }

    /// Unused and not yet expired.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }
}

/// Signup request as entered, validated by the auth service.
#[derive(Debug, Clone)]
pub struct SignupParam {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl SignupParam {
    pub fn from_dto(dto: SignupDto) -> Self {
        Self {
            firstname: dto.firstname,
            lastname: dto.lastname,
            email: dto.email,
            password: dto.password,
            role: dto.role,
        }
    }
}

/// Successful login: the user and their fresh token pair.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub tokens: TokenPair,
}

impl LoginResult {
    pub fn into_dto(self) -> LoginResponseDto {
        LoginResponseDto {
            email: self.user.email,
            firstname: self.user.firstname,
            lastname: self.user.lastname,
            role: self.user.role.as_str().to_string(),
            tokens: self.tokens.into_dto(),
        }
    }
}
