use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SignupDto {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    /// `CUSTOMER` (default) or `AGENT`
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct SignupResponseDto {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct VerifyEmailDto {
    pub email: String,
    pub token: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct EmailDto {
    pub email: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TokensDto {
    pub access: String,
    pub refresh: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct LoginResponseDto {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
    pub tokens: TokensDto,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct RefreshTokenDto {
    pub refresh: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AccessTokenDto {
    pub access: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PasswordResetCheckDto {
    pub success: bool,
    pub message: String,
    pub user_id: i32,
    pub token: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SetNewPasswordDto {
    pub user_id: i32,
    pub token: String,
    pub password: String,
}
