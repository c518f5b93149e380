use chrono::{DateTime, Utc};

use crate::{
    model::notification::NotificationDto,
    server::{
        error::AppError,
        model::{user::Role, Choice},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Unread,
    Read,
}

impl Choice for NotificationStatus {
    const ALL: &'static [Self] = &[Self::Unread, Self::Read];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "UNREAD",
            Self::Read => "READ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub status: NotificationStatus,
    pub user_role: Role,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Result<Self, AppError> {
        Ok(Self {
            status: NotificationStatus::from_column("status", &entity.status)?,
            user_role: Role::from_column("user_role", &entity.user_role)?,
            id: entity.id,
            user_id: entity.user_id,
            message: entity.message,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            status: self.status.as_str().to_string(),
            message: self.message,
            created_at: self.created_at,
        }
    }
}

/// Notification waiting to be written, addressed to one user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: i32,
    pub user_role: Role,
    pub message: String,
}

impl NewNotification {
    pub fn new(user_id: i32, user_role: Role, message: impl Into<String>) -> Self {
        Self {
            user_id,
            user_role,
            message: message.into(),
        }
    }
}
