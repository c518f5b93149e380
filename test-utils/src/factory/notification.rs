//! Notification factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for notifications. Defaults to an unread customer notification created now.
pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    user_role: String,
    status: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl<'a> NotificationFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user: &entity::user::Model) -> Self {
        Self {
            db,
            user_id: user.id,
            user_role: user.role.clone(),
            status: "UNREAD".to_string(),
            message: "Test notification".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Sets the status code, `"UNREAD"` or `"READ"`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            user_role: ActiveValue::Set(self.user_role),
            message: ActiveValue::Set(Some(self.message)),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unread notification for the user.
pub async fn create_notification(
    db: &DatabaseConnection,
    user: &entity::user::Model,
) -> Result<entity::notification::Model, DbErr> {
    NotificationFactory::new(db, user).build().await
}
