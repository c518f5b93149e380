//! User factory for creating test user entities.
//!
//! This module provides factory methods for creating user entities with sensible
//! defaults, reducing boilerplate in tests. The factory supports customization
//! through a builder pattern.

use crate::factory::helpers::{empty_stages, next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let agent = UserFactory::new(&db)
///     .role("AGENT")
///     .phone(Some("08012345678".to_string()))
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    password_hash: String,
    firstname: String,
    lastname: String,
    phone: Option<String>,
    role: String,
    is_verified: bool,
    is_active: bool,
    is_staff: bool,
    display_photo: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - email: `"user{id}@example.com"` where id is auto-incremented
    /// - password_hash: `"unusable"` (login needs a real hash via `password_hash()`)
    /// - firstname / lastname: `"Test"` / `"User"`
    /// - role: `"CUSTOMER"`
    /// - is_verified / is_active: `true`, is_staff: `false`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `UserFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("user{}@example.com", id),
            password_hash: "unusable".to_string(),
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            phone: None,
            role: "CUSTOMER".to_string(),
            is_verified: true,
            is_active: true,
            is_staff: false,
            display_photo: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the stored password hash.
    ///
    /// # Arguments
    /// - `password_hash` - A PHC string as produced by the password hasher
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn firstname(mut self, firstname: impl Into<String>) -> Self {
        self.firstname = firstname.into();
        self
    }

    pub fn lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = lastname.into();
        self
    }

    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    /// Sets the role code, `"CUSTOMER"` or `"AGENT"`.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn verified(mut self, is_verified: bool) -> Self {
        self.is_verified = is_verified;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub fn display_photo(mut self, display_photo: Option<String>) -> Self {
        self.display_photo = display_photo;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            id: ActiveValue::NotSet,
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            firstname: ActiveValue::Set(self.firstname),
            lastname: ActiveValue::Set(self.lastname),
            phone: ActiveValue::Set(self.phone),
            secondary_phone: ActiveValue::Set(None),
            is_verified: ActiveValue::Set(self.is_verified),
            is_active: ActiveValue::Set(self.is_active),
            is_staff: ActiveValue::Set(self.is_staff),
            auth_provider: ActiveValue::Set("email".to_string()),
            role: ActiveValue::Set(self.role),
            nationality: ActiveValue::Set(None),
            agency: ActiveValue::Set(None),
            title: ActiveValue::Set(None),
            summary: ActiveValue::Set(String::new()),
            date_of_birth: ActiveValue::Set(None),
            address: ActiveValue::Set(None),
            city: ActiveValue::Set(Some("Lagos".to_string())),
            country: ActiveValue::Set(Some("Nigeria".to_string())),
            identity_document_type: ActiveValue::Set(None),
            identity_document_number: ActiveValue::Set(None),
            identity_document_expiry_date: ActiveValue::Set(None),
            identity_document_album_id: ActiveValue::Set(None),
            display_photo: ActiveValue::Set(self.display_photo),
            proof_of_address_document: ActiveValue::Set(None),
            stages_of_profile_completion: ActiveValue::Set(empty_stages()),
            stages_of_kyc_verification: ActiveValue::Set(empty_stages()),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a verified customer with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a verified agent with default values.
pub async fn create_agent(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db)
        .role("AGENT")
        .firstname("Agent")
        .build()
        .await
}

/// Creates a staff account.
pub async fn create_staff(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).staff(true).build().await
}
