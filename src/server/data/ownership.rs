use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    error::AppError,
    model::{
        ownership::{CreateOwnershipRequestParam, OwnershipRequest, OwnershipStatus},
        user::Role,
        Choice,
    },
    util::pagination::{PageRequest, PAGE_SIZE},
};

pub struct OwnershipRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OwnershipRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending request.
    pub async fn create(
        &self,
        param: CreateOwnershipRequestParam,
    ) -> Result<OwnershipRequest, AppError> {
        let now = Utc::now();
        let entity = entity::property_ownership::ActiveModel {
            property_id: ActiveValue::Set(param.property_id),
            user_id: ActiveValue::Set(param.user_id),
            user_type: ActiveValue::Set(param.user_type.as_str().to_string()),
            percentage_ownership: ActiveValue::Set(param.percentage_ownership),
            status: ActiveValue::Set(OwnershipStatus::Pending.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        OwnershipRequest::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<OwnershipRequest>, AppError> {
        entity::prelude::PropertyOwnership::find_by_id(id)
            .one(self.db)
            .await?
            .map(OwnershipRequest::from_entity)
            .transpose()
    }

    /// Whether the user already has a pending request for the property.
    pub async fn has_pending(&self, user_id: i32, property_id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::PropertyOwnership::find()
            .filter(entity::property_ownership::Column::UserId.eq(user_id))
            .filter(entity::property_ownership::Column::PropertyId.eq(property_id))
            .filter(
                entity::property_ownership::Column::Status.eq(OwnershipStatus::Pending.as_str()),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Whether another request of the same requester role was already approved.
    ///
    /// # Arguments
    /// - `property_id` - Property the requests target
    /// - `user_type` - Requester role to match
    /// - `exclude_id` - The request under review
    pub async fn other_approved_exists(
        &self,
        property_id: Uuid,
        user_type: Role,
        exclude_id: i32,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::PropertyOwnership::find()
            .filter(entity::property_ownership::Column::PropertyId.eq(property_id))
            .filter(entity::property_ownership::Column::UserType.eq(user_type.as_str()))
            .filter(
                entity::property_ownership::Column::Status.eq(OwnershipStatus::Approved.as_str()),
            )
            .filter(entity::property_ownership::Column::Id.ne(exclude_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: OwnershipStatus,
    ) -> Result<OwnershipRequest, AppError> {
        let model = entity::prelude::PropertyOwnership::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Ownership request with id {} not found",
                id
            )))?;

        let mut active_model: entity::property_ownership::ActiveModel = model.into();
        active_model.status = ActiveValue::Set(status.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        OwnershipRequest::from_entity(active_model.update(self.db).await?)
    }

    /// Requests made by a user, newest first.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<OwnershipRequest>, AppError> {
        entity::prelude::PropertyOwnership::find()
            .filter(entity::property_ownership::Column::UserId.eq(user_id))
            .order_by_desc(entity::property_ownership::Column::CreatedAt)
            .order_by_desc(entity::property_ownership::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(OwnershipRequest::from_entity)
            .collect()
    }

    /// Gets one page of pending requests, oldest first.
    pub async fn get_pending_paginated(
        &self,
        request: PageRequest,
    ) -> Result<(Vec<OwnershipRequest>, u64), AppError> {
        let paginator = entity::prelude::PropertyOwnership::find()
            .filter(
                entity::property_ownership::Column::Status.eq(OwnershipStatus::Pending.as_str()),
            )
            .order_by_asc(entity::property_ownership::Column::CreatedAt)
            .order_by_asc(entity::property_ownership::Column::Id)
            .paginate(self.db, PAGE_SIZE);

        let total = paginator.num_items().await?;
        let requests = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(OwnershipRequest::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((requests, total))
    }
}
