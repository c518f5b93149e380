use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct KycVerificationDto {
    pub user_id: i32,
    /// `profile`, `business` or `billing`
    pub kyc_verification_stage: String,
    /// `approved` or `rejected`
    pub kyc_verification_status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ModeratePropertyDto {
    pub property_id: Uuid,
    /// `PENDING`, `APPROVED` or `REJECTED`
    pub status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct OwnershipReviewDto {
    pub request_id: i32,
    /// `PENDING`, `REJECTED` or `APPROVED`
    pub status: String,
}
