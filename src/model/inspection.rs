use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ScheduleInspectionDto {
    pub property: Uuid,
    /// `YYYY-MM-DD HH:MM:SS` in UTC, or RFC 3339
    pub inspection_date: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct RespondInspectionDto {
    /// `ACCEPTED` or `REJECTED`
    pub status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct InspectionDto {
    pub id: i32,
    pub property: Uuid,
    pub agent: i32,
    pub agent_phone: Option<String>,
    pub agent_firstname: Option<String>,
    pub agent_lastname: Option<String>,
    pub company_name: Option<String>,
    pub client: i32,
    pub client_phone: Option<String>,
    pub client_firstname: Option<String>,
    pub client_lastname: Option<String>,
    pub inspection_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
