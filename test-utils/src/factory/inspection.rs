//! Property inspection factory.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for site visits between a client and the listing agent.
pub struct InspectionFactory<'a> {
    db: &'a DatabaseConnection,
    property_id: Uuid,
    agent_id: i32,
    client_id: i32,
    inspection_date: DateTime<Utc>,
    status: String,
}

impl<'a> InspectionFactory<'a> {
    /// Creates a pending inspection two days from now.
    ///
    /// # Arguments
    /// - `property` - Inspected listing; its agent becomes the inspection agent
    /// - `client_id` - Customer who booked the visit
    pub fn new(db: &'a DatabaseConnection, property: &entity::property::Model, client_id: i32) -> Self {
        Self {
            db,
            property_id: property.id,
            agent_id: property.agent_id,
            client_id,
            inspection_date: Utc::now() + Duration::days(2),
            status: "PENDING".to_string(),
        }
    }

    pub fn inspection_date(mut self, inspection_date: DateTime<Utc>) -> Self {
        self.inspection_date = inspection_date;
        self
    }

    /// Sets the status code (`PENDING`, `CANCELLED`, `REJECTED` or `ACCEPTED`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::property_inspection::Model, DbErr> {
        let now = Utc::now();
        entity::property_inspection::ActiveModel {
            id: ActiveValue::NotSet,
            property_id: ActiveValue::Set(self.property_id),
            agent_id: ActiveValue::Set(self.agent_id),
            agent_phone: ActiveValue::Set(None),
            agent_firstname: ActiveValue::Set(Some("Agent".to_string())),
            agent_lastname: ActiveValue::Set(Some("User".to_string())),
            company_name: ActiveValue::Set(None),
            client_id: ActiveValue::Set(self.client_id),
            client_phone: ActiveValue::Set(None),
            client_firstname: ActiveValue::Set(Some("Test".to_string())),
            client_lastname: ActiveValue::Set(Some("User".to_string())),
            inspection_date: ActiveValue::Set(self.inspection_date),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending inspection with default values.
pub async fn create_inspection(
    db: &DatabaseConnection,
    property: &entity::property::Model,
    client_id: i32,
) -> Result<entity::property_inspection::Model, DbErr> {
    InspectionFactory::new(db, property, client_id).build().await
}
