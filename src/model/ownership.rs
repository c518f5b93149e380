use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct RequestOwnershipDto {
    pub percentage_ownership: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct OwnershipRequestDto {
    pub id: i32,
    pub property: Uuid,
    pub user: i32,
    pub user_type: String,
    pub percentage_ownership: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
