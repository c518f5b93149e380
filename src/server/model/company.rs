//! Company domain models and parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::{
        company::{BankInformationDto, CompanyDto},
        user::BusinessProfileDto,
    },
    server::{
        error::AppError,
        model::{
            from_json_column, media::media_url, property::Property, review::Review, user::User,
        },
    },
};

/// One bank account entry of a company, as stored in the JSON list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInformation {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub country: String,
}

impl BankInformation {
    pub fn into_dto(self) -> BankInformationDto {
        BankInformationDto {
            account_name: self.account_name,
            account_number: self.account_number,
            bank_name: self.bank_name,
            country: self.country,
        }
    }
}

/// Registered business of an agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: i32,
    pub user_id: i32,
    pub email: String,
    pub phone: String,
    pub display_name: String,
    pub website: Option<String>,
    pub city: String,
    pub country: String,
    pub description: Option<String>,
    pub reference_number: String,
    pub company_logo: Option<String>,
    pub certificate_of_incorporation: Option<String>,
    pub bank_information: Vec<BankInformation>,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn from_entity(entity: entity::company::Model) -> Result<Self, AppError> {
        Ok(Self {
            bank_information: from_json_column("bank_information", entity.bank_information)?,
            id: entity.id,
            user_id: entity.user_id,
            email: entity.email,
            phone: entity.phone,
            display_name: entity.display_name,
            website: entity.website,
            city: entity.city,
            country: entity.country,
            description: entity.description,
            reference_number: entity.reference_number,
            company_logo: entity.company_logo,
            certificate_of_incorporation: entity.certificate_of_incorporation,
            created_at: entity.created_at,
        })
    }

    /// # Arguments
    /// - `app_url` - Base URL for media links
    /// - `is_verified` - Outcome of the registry check, false when none ran
    pub fn into_dto(self, app_url: &str, is_verified: bool) -> CompanyDto {
        CompanyDto {
            id: self.id,
            user: self.user_id,
            email: self.email,
            phone: self.phone,
            display_name: self.display_name,
            website: self.website,
            city: self.city,
            country: self.country,
            description: self.description,
            reference_number: self.reference_number,
            company_logo: self.company_logo.map(|path| media_url(app_url, &path)),
            certificate_of_incorporation: self
                .certificate_of_incorporation
                .map(|path| media_url(app_url, &path)),
            bank_information: self
                .bank_information
                .into_iter()
                .map(BankInformation::into_dto)
                .collect(),
            is_verified,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCompanyParam {
    pub user_id: i32,
    pub email: String,
    pub phone: String,
    pub display_name: String,
    pub website: Option<String>,
    pub city: String,
    pub country: String,
    pub description: Option<String>,
    pub reference_number: String,
    pub company_logo: Option<String>,
    pub certificate_of_incorporation: Option<String>,
}

/// Registry check row stored alongside a company.
#[derive(Debug, Clone)]
pub struct CreateCompanyVerificationParam {
    pub user_id: i32,
    pub registration_number: String,
    pub reference_number: String,
    pub registered_company_name: String,
    pub is_verified: bool,
}

/// Public page of an agent: their account, business, listings and reviews.
#[derive(Debug, Clone)]
pub struct BusinessProfile {
    pub user: User,
    pub company: Option<Company>,
    pub company_verified: bool,
    pub properties: Vec<Property>,
    /// Each review with the user who wrote it.
    pub reviews: Vec<(Review, User)>,
    pub rating: Option<f64>,
}

impl BusinessProfile {
    pub fn into_dto(self, app_url: &str) -> BusinessProfileDto {
        let company_verified = self.company_verified;
        BusinessProfileDto {
            user: self.user.into_profile_dto(app_url, None),
            company: self
                .company
                .map(|company| company.into_dto(app_url, company_verified)),
            properties: self
                .properties
                .into_iter()
                .map(|property| property.into_list_item_dto(app_url))
                .collect(),
            reviews: self
                .reviews
                .into_iter()
                .map(|(review, reviewer)| review.into_dto(&reviewer, app_url))
                .collect(),
            rating: self.rating,
        }
    }
}
