//! User domain models and parameters.
//!
//! Provides the account model shared by customers, agents and staff along with
//! the onboarding stage maps and the parameter types for signup and profile updates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::{
        auth::SignupResponseDto,
        user::{AgentDto, ProfileDto, ReviewerDto, StagesDto},
    },
    server::{
        error::AppError,
        model::{
            from_json_column,
            media::{media_url, MediaAlbum},
            Choice,
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Agent,
}

impl Choice for Role {
    const ALL: &'static [Self] = &[Self::Customer, Self::Agent];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Agent => "AGENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityDocumentType {
    NationalId,
    DriversLicense,
    Passport,
}

impl Choice for IdentityDocumentType {
    const ALL: &'static [Self] = &[Self::NationalId, Self::DriversLicense, Self::Passport];

    fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "NATIONAL_ID",
            Self::DriversLicense => "DRIVERS_LICENSE",
            Self::Passport => "PASSPORT",
        }
    }
}

/// One of the three onboarding steps tracked per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStage {
    Profile,
    Business,
    Billing,
}

impl Choice for OnboardingStage {
    const ALL: &'static [Self] = &[Self::Profile, Self::Business, Self::Billing];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Business => "business",
            Self::Billing => "billing",
        }
    }
}

/// Completion flags keyed by onboarding stage, stored as a JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stages {
    #[serde(default)]
    pub profile: bool,
    #[serde(default)]
    pub business: bool,
    #[serde(default)]
    pub billing: bool,
}

impl Stages {
    pub fn set(&mut self, stage: OnboardingStage, value: bool) {
        match stage {
            OnboardingStage::Profile => self.profile = value,
            OnboardingStage::Business => self.business = value,
            OnboardingStage::Billing => self.billing = value,
        }
    }

    pub fn to_json(self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile,
            "business": self.business,
            "billing": self.billing,
        })
    }

    pub fn into_dto(self) -> StagesDto {
        StagesDto {
            profile: self.profile,
            business: self.business,
            billing: self.billing,
        }
    }
}

/// Marketplace account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub is_staff: bool,
    pub auth_provider: String,
    pub role: Role,
    pub nationality: Option<String>,
    pub agency: Option<String>,
    pub title: Option<String>,
    pub summary: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub identity_document_type: Option<IdentityDocumentType>,
    pub identity_document_number: Option<String>,
    pub identity_document_expiry_date: Option<NaiveDate>,
    pub identity_document_album_id: Option<i32>,
    pub display_photo: Option<String>,
    pub proof_of_address_document: Option<String>,
    pub profile_stages: Stages,
    pub kyc_stages: Stages,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr)` - A stored role, document type or stage map is corrupt
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let identity_document_type = entity
            .identity_document_type
            .as_deref()
            .map(|value| IdentityDocumentType::from_column("identity_document_type", value))
            .transpose()?;

        Ok(Self {
            id: entity.id,
            role: Role::from_column("role", &entity.role)?,
            profile_stages: from_json_column(
                "stages_of_profile_completion",
                entity.stages_of_profile_completion,
            )?,
            kyc_stages: from_json_column(
                "stages_of_kyc_verification",
                entity.stages_of_kyc_verification,
            )?,
            email: entity.email,
            password_hash: entity.password_hash,
            firstname: entity.firstname,
            lastname: entity.lastname,
            phone: entity.phone,
            secondary_phone: entity.secondary_phone,
            is_verified: entity.is_verified,
            is_active: entity.is_active,
            is_staff: entity.is_staff,
            auth_provider: entity.auth_provider,
            nationality: entity.nationality,
            agency: entity.agency,
            title: entity.title,
            summary: entity.summary,
            date_of_birth: entity.date_of_birth,
            address: entity.address,
            city: entity.city,
            country: entity.country,
            identity_document_type,
            identity_document_number: entity.identity_document_number,
            identity_document_expiry_date: entity.identity_document_expiry_date,
            identity_document_album_id: entity.identity_document_album_id,
            display_photo: entity.display_photo,
            proof_of_address_document: entity.proof_of_address_document,
            last_login: entity.last_login,
            created_at: entity.created_at,
        })
    }

    /// Full profile without the password hash.
    pub fn into_profile_dto(self, app_url: &str, identity_documents: Option<MediaAlbum>) -> ProfileDto {
        ProfileDto {
            id: self.id,
            email: self.email,
            firstname: self.firstname,
            lastname: self.lastname,
            phone: self.phone,
            secondary_phone: self.secondary_phone,
            is_verified: self.is_verified,
            is_active: self.is_active,
            is_staff: self.is_staff,
            auth_provider: self.auth_provider,
            role: self.role.as_str().to_string(),
            nationality: self.nationality,
            agency: self.agency,
            title: self.title,
            summary: self.summary,
            date_of_birth: self.date_of_birth,
            address: self.address,
            city: self.city,
            country: self.country,
            identity_document_type: self
                .identity_document_type
                .map(|kind| kind.as_str().to_string()),
            identity_document_number: self.identity_document_number,
            identity_document_expiry_date: self.identity_document_expiry_date,
            identity_document_album: identity_documents.map(|album| album.into_dto(app_url)),
            display_photo: self.display_photo.map(|path| media_url(app_url, &path)),
            proof_of_address_document: self
                .proof_of_address_document
                .map(|path| media_url(app_url, &path)),
            stages_of_profile_completion: self.profile_stages.into_dto(),
            stages_of_kyc_verification: self.kyc_stages.into_dto(),
            last_login: self.last_login,
            created_at: self.created_at,
        }
    }

    pub fn into_agent_dto(self, app_url: &str) -> AgentDto {
        AgentDto {
            id: self.id,
            firstname: self.firstname,
            lastname: self.lastname,
            phone: self.phone,
            email: self.email,
            city: self.city,
            country: self.country,
            secondary_phone: self.secondary_phone,
            display_photo: self.display_photo.map(|path| media_url(app_url, &path)),
            title: self.title,
            summary: self.summary,
        }
    }

    pub fn into_signup_dto(self) -> SignupResponseDto {
        SignupResponseDto {
            id: self.id,
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            role: self.role.as_str().to_string(),
        }
    }

    pub fn reviewer_dto(&self, app_url: &str) -> ReviewerDto {
        ReviewerDto {
            id: self.id,
            display_photo: self
                .display_photo
                .as_ref()
                .map(|path| media_url(app_url, path)),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
        }
    }
}

/// A user together with their identity document album.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user: User,
    pub identity_documents: Option<MediaAlbum>,
}

impl Profile {
    pub fn into_dto(self, app_url: &str) -> ProfileDto {
        self.user.into_profile_dto(app_url, self.identity_documents)
    }
}

/// Parameters for inserting a freshly signed up user.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub role: Role,
}

/// Validated profile update. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub identity_document_type: Option<IdentityDocumentType>,
    pub identity_document_number: Option<String>,
    pub identity_document_expiry_date: Option<NaiveDate>,
    pub display_photo: Option<String>,
    pub proof_of_address_document: Option<String>,
}
