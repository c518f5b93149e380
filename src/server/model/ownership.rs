use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::ownership::OwnershipRequestDto,
    server::{
        error::AppError,
        model::{user::Role, Choice},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipStatus {
    Pending,
    Rejected,
    Approved,
}

impl Choice for OwnershipStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Rejected, Self::Approved];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
            Self::Approved => "APPROVED",
        }
    }
}

/// Request by a user to own a percentage of a property.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipRequest {
    pub id: i32,
    pub property_id: Uuid,
    pub user_id: i32,
    /// Role of the requester at the time of the request.
    pub user_type: Role,
    pub percentage_ownership: i32,
    pub status: OwnershipStatus,
    pub created_at: DateTime<Utc>,
}

impl OwnershipRequest {
    pub fn from_entity(entity: entity::property_ownership::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_type: Role::from_column("user_type", &entity.user_type)?,
            status: OwnershipStatus::from_column("status", &entity.status)?,
            id: entity.id,
            property_id: entity.property_id,
            user_id: entity.user_id,
            percentage_ownership: entity.percentage_ownership,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> OwnershipRequestDto {
        OwnershipRequestDto {
            id: self.id,
            property: self.property_id,
            user: self.user_id,
            user_type: self.user_type.as_str().to_string(),
            percentage_ownership: self.percentage_ownership,
            status: self.status.as_str().to_string(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOwnershipRequestParam {
    pub property_id: Uuid,
    pub user_id: i32,
    pub user_type: Role,
    pub percentage_ownership: i32,
}
