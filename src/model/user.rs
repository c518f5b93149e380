use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{company::CompanyDto, media::MediaAlbumDto, property::PropertyListItemDto};

/// Completion flags for the three onboarding stages.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Default)]
pub struct StagesDto {
    pub profile: bool,
    pub business: bool,
    pub billing: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ProfileDto {
    pub id: i32,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub is_staff: bool,
    pub auth_provider: String,
    pub role: String,
    pub nationality: Option<String>,
    pub agency: Option<String>,
    pub title: Option<String>,
    pub summary: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub identity_document_type: Option<String>,
    pub identity_document_number: Option<String>,
    pub identity_document_expiry_date: Option<NaiveDate>,
    pub identity_document_album: Option<MediaAlbumDto>,
    pub display_photo: Option<String>,
    pub proof_of_address_document: Option<String>,
    pub stages_of_profile_completion: StagesDto,
    pub stages_of_kyc_verification: StagesDto,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AgentDto {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub email: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub secondary_phone: Option<String>,
    pub display_photo: Option<String>,
    pub title: Option<String>,
    pub summary: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ReviewerDto {
    pub id: i32,
    pub display_photo: Option<String>,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ReviewDto {
    pub id: i32,
    pub agent: i32,
    pub reviewer: ReviewerDto,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateReviewDto {
    pub rating: Option<i32>,
    pub review: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct BusinessProfileDto {
    pub user: ProfileDto,
    pub company: Option<CompanyDto>,
    pub properties: Vec<PropertyListItemDto>,
    pub reviews: Vec<ReviewDto>,
    pub rating: Option<f64>,
}
