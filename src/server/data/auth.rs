//! Token repositories for bearer tokens, email verification codes and password resets.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::{
    error::AppError,
    model::{
        auth::{AuthToken, EmailVerification, IssueTokenParam, PasswordReset, TokenKind},
        Choice,
    },
};

/// Repository for access and refresh tokens.
pub struct AuthTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuthTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a newly issued token.
    pub async fn create(&self, param: IssueTokenParam) -> Result<AuthToken, AppError> {
        let entity = entity::auth_token::ActiveModel {
            token: ActiveValue::Set(param.token),
            user_id: ActiveValue::Set(param.user_id),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            expires_at: ActiveValue::Set(param.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        AuthToken::from_entity(entity)
    }

    /// Finds a token of the given kind, expired or not.
    ///
    /// # Returns
    /// - `Ok(Some(AuthToken))` - Token found, callers check `is_expired`
    /// - `Ok(None)` - No such token of that kind
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn find(&self, token: &str, kind: TokenKind) -> Result<Option<AuthToken>, AppError> {
        entity::prelude::AuthToken::find()
            .filter(entity::auth_token::Column::Token.eq(token))
            .filter(entity::auth_token::Column::Kind.eq(kind.as_str()))
            .one(self.db)
            .await?
            .map(AuthToken::from_entity)
            .transpose()
    }

    /// Revokes a single token.
    pub async fn delete(&self, token: &str) -> Result<(), DbErr> {
        entity::prelude::AuthToken::delete_many()
            .filter(entity::auth_token::Column::Token.eq(token))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Revokes every token of a user.
    pub async fn delete_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::AuthToken::delete_many()
            .filter(entity::auth_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes tokens that expired at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::AuthToken::delete_many()
            .filter(entity::auth_token::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

/// Repository for the one-per-user email verification row.
pub struct EmailVerificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmailVerificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates the verification row or replaces the code of an existing one.
    ///
    /// # Arguments
    /// - `user_id` - User being verified
    /// - `token` - Fresh numeric code
    /// - `token_expiry` - When the code stops being accepted
    pub async fn upsert(
        &self,
        user_id: i32,
        token: String,
        token_expiry: DateTime<Utc>,
    ) -> Result<EmailVerification, DbErr> {
        let now = Utc::now();
        let existing = entity::prelude::EmailVerification::find()
            .filter(entity::email_verification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(model) => {
                let mut active_model: entity::email_verification::ActiveModel = model.into();
                active_model.token = ActiveValue::Set(token);
                active_model.token_expiry = ActiveValue::Set(token_expiry);
                active_model.is_verified = ActiveValue::Set(false);
                active_model.updated_at = ActiveValue::Set(now);
                active_model.update(self.db).await?
            }
            None => {
                entity::email_verification::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    is_verified: ActiveValue::Set(false),
                    token: ActiveValue::Set(token),
                    token_expiry: ActiveValue::Set(token_expiry),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(EmailVerification::from_entity(entity))
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<EmailVerification>, DbErr> {
        let entity = entity::prelude::EmailVerification::find()
            .filter(entity::email_verification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(EmailVerification::from_entity))
    }

    /// Marks the code consumed; the expiry becomes `now` so it cannot be replayed.
    pub async fn mark_verified(&self, user_id: i32, now: DateTime<Utc>) -> Result<(), DbErr> {
        let model = entity::prelude::EmailVerification::find()
            .filter(entity::email_verification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Email verification for user {} not found",
                user_id
            )))?;

        let mut active_model: entity::email_verification::ActiveModel = model.into();
        active_model.is_verified = ActiveValue::Set(true);
        active_model.token_expiry = ActiveValue::Set(now);
        active_model.updated_at = ActiveValue::Set(now);
        active_model.update(self.db).await?;

        Ok(())
    }
}

/// Repository for password reset tokens.
pub struct PasswordResetRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PasswordResetRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordReset, DbErr> {
        let now = Utc::now();
        let entity = entity::password_reset::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token: ActiveValue::Set(token),
            used: ActiveValue::Set(false),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PasswordReset::from_entity(entity))
    }

    /// Finds the reset row matching both user and token.
    pub async fn find(&self, user_id: i32, token: &str) -> Result<Option<PasswordReset>, DbErr> {
        let entity = entity::prelude::PasswordReset::find()
            .filter(entity::password_reset::Column::UserId.eq(user_id))
            .filter(entity::password_reset::Column::Token.eq(token))
            .one(self.db)
            .await?;

        Ok(entity.map(PasswordReset::from_entity))
    }

    pub async fn mark_used(&self, id: i32) -> Result<(), DbErr> {
        let model = entity::prelude::PasswordReset::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Password reset with id {} not found",
                id
            )))?;

        let mut active_model: entity::password_reset::ActiveModel = model.into();
        active_model.used = ActiveValue::Set(true);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await?;

        Ok(())
    }

    /// Deletes tokens that are used or expired at `now`.
    pub async fn delete_stale(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordReset::delete_many()
            .filter(
                Condition::any()
                    .add(entity::password_reset::Column::Used.eq(true))
                    .add(entity::password_reset::Column::ExpiresAt.lte(now)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
