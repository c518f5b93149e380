use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::inspection::InspectionDto,
    server::{error::AppError, model::Choice},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionStatus {
    Pending,
    Cancelled,
    Rejected,
    Accepted,
}

impl Choice for InspectionStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Cancelled, Self::Rejected, Self::Accepted];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
            Self::Accepted => "ACCEPTED",
        }
    }
}

/// Site visit booked by a customer, with contact details copied at booking time.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub id: i32,
    pub property_id: Uuid,
    pub agent_id: i32,
    pub agent_phone: Option<String>,
    pub agent_firstname: Option<String>,
    pub agent_lastname: Option<String>,
    pub company_name: Option<String>,
    pub client_id: i32,
    pub client_phone: Option<String>,
    pub client_firstname: Option<String>,
    pub client_lastname: Option<String>,
    pub inspection_date: DateTime<Utc>,
    pub status: InspectionStatus,
    pub created_at: DateTime<Utc>,
}

impl Inspection {
    pub fn from_entity(entity: entity::property_inspection::Model) -> Result<Self, AppError> {
        Ok(Self {
            status: InspectionStatus::from_column("status", &entity.status)?,
            id: entity.id,
            property_id: entity.property_id,
            agent_id: entity.agent_id,
            agent_phone: entity.agent_phone,
            agent_firstname: entity.agent_firstname,
            agent_lastname: entity.agent_lastname,
            company_name: entity.company_name,
            client_id: entity.client_id,
            client_phone: entity.client_phone,
            client_firstname: entity.client_firstname,
            client_lastname: entity.client_lastname,
            inspection_date: entity.inspection_date,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> InspectionDto {
        InspectionDto {
            id: self.id,
            property: self.property_id,
            agent: self.agent_id,
            agent_phone: self.agent_phone,
            agent_firstname: self.agent_firstname,
            agent_lastname: self.agent_lastname,
            company_name: self.company_name,
            client: self.client_id,
            client_phone: self.client_phone,
            client_firstname: self.client_firstname,
            client_lastname: self.client_lastname,
            inspection_date: self.inspection_date,
            status: self.status.as_str().to_string(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInspectionParam {
    pub property_id: Uuid,
    pub agent_id: i32,
    pub agent_phone: Option<String>,
    pub agent_firstname: Option<String>,
    pub agent_lastname: Option<String>,
    pub company_name: Option<String>,
    pub client_id: i32,
    pub client_phone: Option<String>,
    pub client_firstname: Option<String>,
    pub client_lastname: Option<String>,
    pub inspection_date: DateTime<Utc>,
}
