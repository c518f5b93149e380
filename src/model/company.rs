use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct BankInformationDto {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub country: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct CompanyDto {
    pub id: i32,
    pub user: i32,
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
    pub bank_information: Vec<BankInformationDto>,
    /// Whether the registry lookup matched the registered company name
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw bank information map, validated against the expected key set.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct AddBankInformationDto {
    #[schema(value_type = Object)]
    pub bank_information: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct BankInformationListDto {
    pub bank_information: Vec<BankInformationDto>,
}
