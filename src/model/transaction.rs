use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TransactionDto {
    pub reference: String,
    pub property_name: Option<String>,
    pub property: Uuid,
    /// `PENDING`, `SUCCESS` or `FAILED`
    pub status: String,
    pub amount: i64,
    pub number_of_shares: i32,
    pub created_at: DateTime<Utc>,
}
