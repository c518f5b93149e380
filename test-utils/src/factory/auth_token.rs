//! Bearer token and one-time token factories.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a bearer token row.
///
/// # Arguments
/// - `kind` - `"ACCESS"` or `"REFRESH"`
/// - `expires_at` - Expiry; a past value gives an expired token
pub async fn create_auth_token(
    db: &DatabaseConnection,
    user_id: i32,
    kind: &str,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<entity::auth_token::Model, DbErr> {
    entity::auth_token::ActiveModel {
        id: ActiveValue::NotSet,
        token: ActiveValue::Set(token.to_string()),
        user_id: ActiveValue::Set(user_id),
        kind: ActiveValue::Set(kind.to_string()),
        expires_at: ActiveValue::Set(expires_at),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Inserts an email verification row for the user.
pub async fn create_email_verification(
    db: &DatabaseConnection,
    user_id: i32,
    token: &str,
    token_expiry: DateTime<Utc>,
) -> Result<entity::email_verification::Model, DbErr> {
    let now = Utc::now();
    entity::email_verification::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(user_id),
        is_verified: ActiveValue::Set(false),
        token: ActiveValue::Set(token.to_string()),
        token_expiry: ActiveValue::Set(token_expiry),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Inserts a password reset row for the user.
pub async fn create_password_reset(
    db: &DatabaseConnection,
    user_id: i32,
    token: &str,
    expires_at: DateTime<Utc>,
    used: bool,
) -> Result<entity::password_reset::Model, DbErr> {
    let now = Utc::now();
    entity::password_reset::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(user_id),
        token: ActiveValue::Set(token.to_string()),
        used: ActiveValue::Set(used),
        expires_at: ActiveValue::Set(expires_at),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
