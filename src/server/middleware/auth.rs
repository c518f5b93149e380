use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{auth::AuthTokenRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{auth::TokenKind, user::{Role, User}},
};

pub enum Permission {
    /// Any holder of a valid access token.
    Authenticated,
    Agent,
    Customer,
    Staff,
}

/// Resolves the user behind an `Authorization: Bearer` header.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, headers: &'a HeaderMap) -> Self {
        Self { db, headers }
    }

    /// Raw bearer token of the request.
    ///
    /// # Returns
    /// - `Ok(&str)` - Token following the `Bearer ` prefix
    /// - `Err(AuthError::MissingCredentials)` - No header, another scheme, or an empty token
    pub fn token(&self) -> Result<&'a str, AuthError> {
        let value = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingCredentials)?;

        match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
                Ok(token.trim())
            }
            _ => Err(AuthError::MissingCredentials),
        }
    }

    /// Authenticates the request and checks each permission in order.
    ///
    /// # Returns
    /// - `Ok(User)` - The active user owning the access token
    /// - `Err(AuthError::MissingCredentials)` - No bearer token was sent
    /// - `Err(AuthError::InvalidToken)` - Unknown or expired token, or an inactive user
    /// - `Err(AuthError::AccessDenied)` - A permission check failed
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let token = self.token()?;

        let Some(auth_token) = AuthTokenRepository::new(self.db)
            .find(token, TokenKind::Access)
            .await?
        else {
            return Err(AuthError::InvalidToken.into());
        };
        if auth_token.is_expired(Utc::now()) {
            return Err(AuthError::InvalidToken.into());
        }

        let user = match UserRepository::new(self.db)
            .find_by_id(auth_token.user_id)
            .await?
        {
            Some(user) if user.is_active => user,
            _ => return Err(AuthError::InvalidToken.into()),
        };

        for permission in permissions {
            match permission {
                Permission::Authenticated => {}
                Permission::Agent => {
                    if user.role != Role::Agent {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "Endpoint is restricted to agents".to_string(),
                        )
                        .into());
                    }
                }
                Permission::Customer => {
                    if user.role != Role::Customer {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "Endpoint is restricted to customers".to_string(),
                        )
                        .into());
                    }
                }
                Permission::Staff => {
                    if !user.is_staff {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "Endpoint is restricted to staff".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }
}
