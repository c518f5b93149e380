//! User entity - marketplace accounts for customers and real estate agents.
//!
//! Profile and KYC fields are nullable until the user completes onboarding. The two
//! stage maps are JSON objects keyed by `profile`, `business` and `billing`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub is_staff: bool,
    pub auth_provider: String,
    /// `CUSTOMER` or `AGENT`
    pub role: String,
    pub nationality: Option<String>,
    pub agency: Option<String>,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub date_of_birth: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// `NATIONAL_ID`, `DRIVERS_LICENSE` or `PASSPORT`
    pub identity_document_type: Option<String>,
    pub identity_document_number: Option<String>,
    pub identity_document_expiry_date: Option<Date>,
    pub identity_document_album_id: Option<i32>,
    pub display_photo: Option<String>,
    pub proof_of_address_document: Option<String>,
    pub stages_of_profile_completion: Json,
    pub stages_of_kyc_verification: Json,
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::media_album::Entity",
        from = "Column::IdentityDocumentAlbumId",
        to = "super::media_album::Column::Id",
        on_delete = "SetNull"
    )]
    IdentityDocumentAlbum,
    #[sea_orm(has_one = "super::company::Entity")]
    Company,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
