//! Property factory for creating test listings.
//!
//! Properties default to a pending, unpriced listing in the `LISTING` stage. Tests
//! that need a purchasable listing set `moderation_status("APPROVED")` and a price,
//! or use `helpers::create_marketplace_property`.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test properties with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let property = PropertyFactory::new(&db, &agent, &company)
///     .moderation_status("APPROVED")
///     .city(Some("Abuja".to_string()))
///     .build()
///     .await?;
/// ```
pub struct PropertyFactory<'a> {
    db: &'a DatabaseConnection,
    agent_id: i32,
    company_id: i32,
    company_name: String,
    name: String,
    moderation_status: String,
    archived: bool,
    stage: String,
    percentage_sold: i32,
    city: Option<String>,
    state: String,
    country: String,
    price_per_share: Option<i64>,
    total_number_of_shares: Option<i32>,
    image_album_id: Option<i32>,
    document_album_id: Option<i32>,
    scheduled_stays: serde_json::Value,
    created_at: chrono::DateTime<Utc>,
}

impl<'a> PropertyFactory<'a> {
    /// Creates a new PropertyFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Property {id}"`
    /// - moderation_status: `"PENDING"`, stage: `"LISTING"`, not archived
    /// - city / state / country: `Lagos` / `Lagos` / `Nigeria`
    /// - no price, no share cap, no albums, no stays
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `agent` - Listing agent
    /// - `company` - Agent's company, whose display name is copied onto the listing
    pub fn new(
        db: &'a DatabaseConnection,
        agent: &entity::user::Model,
        company: &entity::company::Model,
    ) -> Self {
        let id = next_id();
        Self {
            db,
            agent_id: agent.id,
            company_id: company.id,
            company_name: company.display_name.clone(),
            name: format!("Property {}", id),
            moderation_status: "PENDING".to_string(),
            archived: false,
            stage: "LISTING".to_string(),
            percentage_sold: 0,
            city: Some("Lagos".to_string()),
            state: "Lagos".to_string(),
            country: "Nigeria".to_string(),
            price_per_share: None,
            total_number_of_shares: None,
            image_album_id: None,
            document_album_id: None,
            scheduled_stays: serde_json::json!([]),
            created_at: Utc::now(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the moderation status code (`PENDING`, `APPROVED` or `REJECTED`).
    pub fn moderation_status(mut self, status: impl Into<String>) -> Self {
        self.moderation_status = status.into();
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Sets the ownership stage code (`LISTING`, `MARKETPLACE` or `SOLD`).
    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    pub fn percentage_sold(mut self, percentage_sold: i32) -> Self {
        self.percentage_sold = percentage_sold;
        self
    }

    pub fn city(mut self, city: Option<String>) -> Self {
        self.city = city;
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn price_per_share(mut self, price_per_share: Option<i64>) -> Self {
        self.price_per_share = price_per_share;
        self
    }

    pub fn total_number_of_shares(mut self, total: Option<i32>) -> Self {
        self.total_number_of_shares = total;
        self
    }

    pub fn image_album_id(mut self, album_id: Option<i32>) -> Self {
        self.image_album_id = album_id;
        self
    }

    pub fn document_album_id(mut self, album_id: Option<i32>) -> Self {
        self.document_album_id = album_id;
        self
    }

    /// Sets the raw JSON list of `[start, end]` stays.
    pub fn scheduled_stays(mut self, stays: serde_json::Value) -> Self {
        self.scheduled_stays = stays;
        self
    }

    pub fn created_at(mut self, created_at: chrono::DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the property entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::property::Model)` - Created property entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::property::Model, DbErr> {
        let empty = serde_json::json!([]);
        entity::property::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(self.name),
            agent_id: ActiveValue::Set(self.agent_id),
            company_id: ActiveValue::Set(self.company_id),
            company_name: ActiveValue::Set(self.company_name),
            description: ActiveValue::Set("A test listing".to_string()),
            moderation_status: ActiveValue::Set(self.moderation_status),
            archived: ActiveValue::Set(self.archived),
            completion_status: ActiveValue::Set("COMPLETED".to_string()),
            stage: ActiveValue::Set(self.stage),
            percentage_sold: ActiveValue::Set(self.percentage_sold),
            apartment_type: ActiveValue::Set("Duplex".to_string()),
            address: ActiveValue::Set("1 Test Street".to_string()),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(self.state),
            country: ActiveValue::Set(self.country),
            zip_code: ActiveValue::Set(None),
            percentage_discount: ActiveValue::Set(None),
            promotion_closing_date: ActiveValue::Set(None),
            promotion_type: ActiveValue::Set(String::new()),
            other_deals: ActiveValue::Set(String::new()),
            other_incentives: ActiveValue::Set(String::new()),
            image_album_id: ActiveValue::Set(self.image_album_id),
            document_album_id: ActiveValue::Set(self.document_album_id),
            default_image: ActiveValue::Set(None),
            number_of_bedrooms: ActiveValue::Set(Some(3)),
            number_of_toilets: ActiveValue::Set(Some(2)),
            benefits: ActiveValue::Set(empty.clone()),
            amenities: ActiveValue::Set(empty.clone()),
            erf_size: ActiveValue::Set(String::new()),
            dining_area: ActiveValue::Set(String::new()),
            cross_streets: ActiveValue::Set(empty.clone()),
            landmarks: ActiveValue::Set(empty),
            floor_size: ActiveValue::Set(String::new()),
            date_built: ActiveValue::Set(None),
            price_per_share: ActiveValue::Set(self.price_per_share),
            completion_cost: ActiveValue::Set(None),
            completion_date: ActiveValue::Set(None),
            percentage_completed: ActiveValue::Set(None),
            total_number_of_shares: ActiveValue::Set(self.total_number_of_shares),
            total_property_cost: ActiveValue::Set(None),
            expected_roi: ActiveValue::Set(None),
            area_rent_rolls: ActiveValue::Set(String::new()),
            scheduled_stays: ActiveValue::Set(self.scheduled_stays),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending property with default values.
pub async fn create_property(
    db: &DatabaseConnection,
    agent: &entity::user::Model,
    company: &entity::company::Model,
) -> Result<entity::property::Model, DbErr> {
    PropertyFactory::new(db, agent, company).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::helpers::create_marketplace_property};

    #[tokio::test]
    async fn creates_marketplace_property() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (agent, company, property) = create_marketplace_property(db).await?;

        assert_eq!(property.agent_id, agent.id);
        assert_eq!(property.company_name, company.display_name);
        assert_eq!(property.moderation_status, "APPROVED");
        assert_eq!(property.price_per_share, Some(1000));

        Ok(())
    }
}
