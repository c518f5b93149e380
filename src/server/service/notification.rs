use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::notification::Notification,
    util::pagination::{Page, PageRequest},
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets one page of the user's notifications, newest first.
    pub async fn list(
        &self,
        user_id: i32,
        request: PageRequest,
    ) -> Result<Page<Notification>, AppError> {
        let (notifications, total) = NotificationRepository::new(self.db)
            .get_for_user_paginated(user_id, request)
            .await?;

        Page::new(notifications, total, request)
    }

    /// Marks one of the user's notifications read.
    ///
    /// # Returns
    /// - `Ok(Notification)` - The updated notification
    /// - `Err(AppError::NotFound)` - No such notification for this user
    pub async fn mark_read(
        &self,
        user_id: i32,
        notification_id: i32,
    ) -> Result<Notification, AppError> {
        NotificationRepository::new(self.db)
            .mark_read(user_id, notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }

    /// Marks every unread notification of the user read, returning how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .count_unread(user_id)
            .await?)
    }
}
