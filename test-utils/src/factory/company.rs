//! Company factory for creating test company entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test companies owned by an agent.
///
/// # Example
///
/// ```rust,ignore
/// let company = CompanyFactory::new(&db, agent.id)
///     .display_name("Sunrise Homes")
///     .build()
///     .await?;
/// ```
pub struct CompanyFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    email: String,
    phone: String,
    display_name: String,
    reference_number: String,
    bank_information: serde_json::Value,
}

impl<'a> CompanyFactory<'a> {
    /// Creates a new CompanyFactory with default values.
    ///
    /// Defaults:
    /// - email: `"company{id}@example.com"`
    /// - phone: `"0800{id}"`
    /// - display_name: `"Company {id}"`
    /// - bank_information: empty list
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            email: format!("company{}@example.com", id),
            phone: format!("0800{}", id),
            display_name: format!("Company {}", id),
            reference_number: format!("REF{:09}", id),
            bank_information: serde_json::json!([]),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the raw JSON bank information list.
    pub fn bank_information(mut self, bank_information: serde_json::Value) -> Self {
        self.bank_information = bank_information;
        self
    }

    /// Builds and inserts the company entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::company::Model)` - Created company entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::company::Model, DbErr> {
        let now = Utc::now();
        entity::company::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            email: ActiveValue::Set(self.email),
            phone: ActiveValue::Set(self.phone),
            display_name: ActiveValue::Set(self.display_name),
            website: ActiveValue::Set(None),
            city: ActiveValue::Set("Lagos".to_string()),
            country: ActiveValue::Set("Nigeria".to_string()),
            description: ActiveValue::Set(None),
            reference_number: ActiveValue::Set(self.reference_number),
            company_logo: ActiveValue::Set(None),
            certificate_of_incorporation: ActiveValue::Set(None),
            bank_information: ActiveValue::Set(self.bank_information),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a company with default values for the given owner.
pub async fn create_company(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::company::Model, DbErr> {
    CompanyFactory::new(db, user_id).build().await
}
