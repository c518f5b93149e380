use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{ownership::OwnershipRepository, property::PropertyRepository},
    error::{validation::ValidationError, AppError},
    model::{
        ownership::{CreateOwnershipRequestParam, OwnershipRequest},
        user::User,
    },
};

pub struct OwnershipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OwnershipService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Asks staff for a share of a property.
    ///
    /// # Arguments
    /// - `user` - The requester, whose role is recorded as the request's user type
    /// - `property_id` - Property to own part of
    /// - `percentage_ownership` - Requested share, 1 to 100
    ///
    /// # Returns
    /// - `Ok(OwnershipRequest)` - The pending request
    /// - `Err(AppError::NotFound)` - No property with that id
    /// - `Err(AppError::Conflict)` - The user already has a pending request for it
    /// - `Err(AppError::ValidationErr)` - Percentage out of range or above what remains
    pub async fn request_ownership(
        &self,
        user: &User,
        property_id: Uuid,
        percentage_ownership: i32,
    ) -> Result<OwnershipRequest, AppError> {
        if !(1..=100).contains(&percentage_ownership) {
            return Err(ValidationError::new(
                "percentage_ownership",
                "Ensure this value is between 1 and 100.",
            )
            .into());
        }

        let property = PropertyRepository::new(self.db)
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No property with that ID".to_string()))?;

        let ownership_repo = OwnershipRepository::new(self.db);
        if ownership_repo.has_pending(user.id, property_id).await? {
            return Err(AppError::Conflict(
                "you already have a pending request for this property".to_string(),
            ));
        }

        if percentage_ownership + property.percentage_sold > 100 {
            return Err(ValidationError::new(
                "percentage_ownership",
                format!(
                    "only {}% of this property is still available",
                    100 - property.percentage_sold
                ),
            )
            .into());
        }

        ownership_repo
            .create(CreateOwnershipRequestParam {
                property_id,
                user_id: user.id,
                user_type: user.role,
                percentage_ownership,
            })
            .await
    }

    pub async fn list_my_requests(&self, user: &User) -> Result<Vec<OwnershipRequest>, AppError> {
        OwnershipRepository::new(self.db).get_for_user(user.id).await
    }
}
