//! Property ownership request factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for ownership requests. Defaults to a pending 10% request by a customer.
pub struct OwnershipFactory<'a> {
    db: &'a DatabaseConnection,
    property_id: Uuid,
    user_id: i32,
    user_type: String,
    percentage_ownership: i32,
    status: String,
}

impl<'a> OwnershipFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, property_id: Uuid, user_id: i32) -> Self {
        Self {
            db,
            property_id,
            user_id,
            user_type: "CUSTOMER".to_string(),
            percentage_ownership: 10,
            status: "PENDING".to_string(),
        }
    }

    pub fn user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = user_type.into();
        self
    }

    pub fn percentage_ownership(mut self, percentage: i32) -> Self {
        self.percentage_ownership = percentage;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::property_ownership::Model, DbErr> {
        let now = Utc::now();
        entity::property_ownership::ActiveModel {
            id: ActiveValue::NotSet,
            property_id: ActiveValue::Set(self.property_id),
            user_id: ActiveValue::Set(self.user_id),
            user_type: ActiveValue::Set(self.user_type),
            percentage_ownership: ActiveValue::Set(self.percentage_ownership),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending ownership request with default values.
pub async fn create_ownership_request(
    db: &DatabaseConnection,
    property_id: Uuid,
    user_id: i32,
) -> Result<entity::property_ownership::Model, DbErr> {
    OwnershipFactory::new(db, property_id, user_id).build().await
}
