use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::review::{CreateReviewParam, Review};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateReviewParam) -> Result<Review, DbErr> {
        let now = Utc::now();
        let entity = entity::review::ActiveModel {
            agent_id: ActiveValue::Set(param.agent_id),
            reviewer_id: ActiveValue::Set(param.reviewer_id),
            rating: ActiveValue::Set(param.rating),
            review: ActiveValue::Set(param.review),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Review::from_entity(entity))
    }

    /// Reviews received by an agent, newest first.
    pub async fn get_for_agent(&self, agent_id: i32) -> Result<Vec<Review>, DbErr> {
        let reviews = entity::prelude::Review::find()
            .filter(entity::review::Column::AgentId.eq(agent_id))
            .order_by_desc(entity::review::Column::CreatedAt)
            .order_by_desc(entity::review::Column::Id)
            .all(self.db)
            .await?;

        Ok(reviews.into_iter().map(Review::from_entity).collect())
    }
}
