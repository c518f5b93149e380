//! Notification repository.
//!
//! Writes go through the caller's connection, so notifications created inside a
//! service transaction commit or roll back together with the change they describe.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        notification::{NewNotification, Notification, NotificationStatus},
        Choice,
    },
    util::pagination::{PageRequest, PAGE_SIZE},
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts one unread notification.
    pub async fn create(&self, notification: NewNotification) -> Result<Notification, AppError> {
        let now = Utc::now();
        let entity = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(notification.user_id),
            status: ActiveValue::Set(NotificationStatus::Unread.as_str().to_string()),
            user_role: ActiveValue::Set(notification.user_role.as_str().to_string()),
            message: ActiveValue::Set(Some(notification.message)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Notification::from_entity(entity)
    }

    /// Inserts several unread notifications in one statement.
    pub async fn create_many(&self, notifications: Vec<NewNotification>) -> Result<(), DbErr> {
        if notifications.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models = notifications
            .into_iter()
            .map(|notification| entity::notification::ActiveModel {
                user_id: ActiveValue::Set(notification.user_id),
                status: ActiveValue::Set(NotificationStatus::Unread.as_str().to_string()),
                user_role: ActiveValue::Set(notification.user_role.as_str().to_string()),
                message: ActiveValue::Set(Some(notification.message)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            });

        entity::prelude::Notification::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Gets one page of a user's notifications, newest first.
    pub async fn get_for_user_paginated(
        &self,
        user_id: i32,
        request: PageRequest,
    ) -> Result<(Vec<Notification>, u64), AppError> {
        let paginator = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, PAGE_SIZE);

        let total = paginator.num_items().await?;
        let notifications = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((notifications, total))
    }

    /// Marks one of the user's notifications read.
    ///
    /// # Returns
    /// - `Ok(Some(Notification))` - The updated notification
    /// - `Ok(None)` - No notification with that id belongs to the user
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn mark_read(
        &self,
        user_id: i32,
        notification_id: i32,
    ) -> Result<Option<Notification>, AppError> {
        let Some(model) = entity::prelude::Notification::find_by_id(notification_id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::notification::ActiveModel = model.into();
        active_model.status = ActiveValue::Set(NotificationStatus::Read.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Notification::from_entity(active_model.update(self.db).await?).map(Some)
    }

    /// Marks every unread notification of the user read.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(
                entity::notification::Column::Status,
                sea_orm::sea_query::Expr::value(NotificationStatus::Read.as_str()),
            )
            .col_expr(
                entity::notification::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Status.eq(NotificationStatus::Unread.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Status.eq(NotificationStatus::Unread.as_str()))
            .count(self.db)
            .await
    }

    /// Deletes read notifications created before `cutoff`.
    pub async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Status.eq(NotificationStatus::Read.as_str()))
            .filter(entity::notification::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
