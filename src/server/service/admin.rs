//! Staff moderation of KYC submissions, listings and ownership requests.
//!
//! Every decision is stored together with a notification for the affected user in
//! one transaction.

use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{
        notification::NotificationRepository, ownership::OwnershipRepository,
        property::PropertyRepository, user::UserRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        notification::NewNotification,
        ownership::{OwnershipRequest, OwnershipStatus},
        property::{ModerationStatus, Property},
        user::{OnboardingStage, Role},
        Choice,
    },
    util::pagination::{Page, PageRequest},
};

const KYC_APPROVED: &str = "approved";
const KYC_REJECTED: &str = "rejected";

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a KYC decision for one onboarding stage of a user.
    ///
    /// Both the verification and the completion map of the stage are set to whether
    /// the stage was approved.
    ///
    /// # Arguments
    /// - `user_id` - User under review
    /// - `stage` - `profile`, `business` or `billing`
    /// - `status` - `approved` or `rejected`
    ///
    /// # Returns
    /// - `Ok(String)` - The recorded status
    /// - `Err(AppError::ValidationErr)` - Unknown stage or status
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn kyc_verification(
        &self,
        user_id: i32,
        stage: &str,
        status: &str,
    ) -> Result<String, AppError> {
        let stage = OnboardingStage::parse(stage).ok_or_else(|| {
            ValidationError::new(
                "kyc_verification_stage",
                format!(
                    "\"{}\" is not a valid choice. Choose one of {}.",
                    stage,
                    OnboardingStage::choices()
                ),
            )
        })?;
        if status != KYC_APPROVED && status != KYC_REJECTED {
            return Err(ValidationError::new(
                "kyc_verification_status",
                format!(
                    "\"{}\" is not a valid choice. Choose one of {}, {}.",
                    status, KYC_APPROVED, KYC_REJECTED
                ),
            )
            .into());
        }

        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("resource not found".to_string()))?;

        let txn = self.db.begin().await?;
        UserRepository::new(&txn)
            .set_kyc_stage(user.id, stage, status == KYC_APPROVED)
            .await?;
        NotificationRepository::new(&txn)
            .create(NewNotification::new(
                user.id,
                user.role,
                format!(
                    "Your {} KYC verification was {}",
                    stage.as_str(),
                    status
                ),
            ))
            .await?;
        txn.commit().await?;

        tracing::info!("KYC {} stage of user {} {}", stage.as_str(), user.id, status);

        Ok(status.to_string())
    }

    /// Sets the moderation status of a listing and notifies its agent.
    ///
    /// # Returns
    /// - `Ok(String)` - The recorded status
    /// - `Err(AppError::ValidationErr)` - Unknown status
    /// - `Err(AppError::NotFound)` - No property with that id
    pub async fn moderate_property(
        &self,
        property_id: Uuid,
        status: &str,
    ) -> Result<String, AppError> {
        let status = parse_choice::<ModerationStatus>("status", status)?;

        let property = PropertyRepository::new(self.db)
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| AppError::NotFound("resource not found".to_string()))?;

        let txn = self.db.begin().await?;
        PropertyRepository::new(&txn)
            .set_moderation_status(property.id, status)
            .await?;
        NotificationRepository::new(&txn)
            .create(NewNotification::new(
                property.agent_id,
                Role::Agent,
                format!(
                    "Moderation status of property {} is now {}",
                    property.name,
                    status.as_str()
                ),
            ))
            .await?;
        txn.commit().await?;

        Ok(status.as_str().to_string())
    }

    /// Decides an ownership request.
    ///
    /// Approving a request advances the property's ownership stage and adds the
    /// requested share to its sold percentage, capped at 100. Only one request per
    /// property and requester role may be approved.
    ///
    /// # Arguments
    /// - `request_id` - Ownership request under review
    /// - `status` - `PENDING`, `REJECTED` or `APPROVED`
    ///
    /// # Returns
    /// - `Ok(String)` - The recorded status
    /// - `Err(AppError::ValidationErr)` - Unknown status
    /// - `Err(AppError::NotFound)` - Unknown request or property
    /// - `Err(AppError::BadRequest)` - Another request was already approved
    pub async fn review_ownership_request(
        &self,
        request_id: i32,
        status: &str,
    ) -> Result<String, AppError> {
        let status = parse_choice::<OwnershipStatus>("status", status)?;

        let txn = self.db.begin().await?;
        let ownership_repo = OwnershipRepository::new(&txn);
        let property_repo = PropertyRepository::new(&txn);

        let request = ownership_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("resource not found".to_string()))?;
        let property = property_repo
            .find_by_id(request.property_id)
            .await?
            .ok_or_else(|| AppError::NotFound("resource not found".to_string()))?;

        if status == OwnershipStatus::Approved && request.status != OwnershipStatus::Approved {
            if ownership_repo
                .other_approved_exists(property.id, request.user_type, request.id)
                .await?
            {
                return Err(AppError::BadRequest(
                    "property has been approved for another user".to_string(),
                ));
            }

            let percentage_sold = (property.percentage_sold + request.percentage_ownership).min(100);
            property_repo
                .record_sale(property.id, property.stage.advance(), percentage_sold)
                .await?;
        }

        ownership_repo.set_status(request.id, status).await?;
        NotificationRepository::new(&txn)
            .create(NewNotification::new(
                request.user_id,
                request.user_type,
                format!(
                    "Your ownership request for property {} is {}",
                    property.name,
                    status.as_str()
                ),
            ))
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Ownership request {} for property {} set to {}",
            request.id,
            property.id,
            status.as_str()
        );

        Ok(status.as_str().to_string())
    }

    /// Gets one page of listings awaiting moderation, oldest first.
    pub async fn pending_properties(&self, request: PageRequest) -> Result<Page<Property>, AppError> {
        let (properties, total) = PropertyRepository::new(self.db)
            .get_pending_paginated(request)
            .await?;

        Page::new(properties, total, request)
    }

    pub async fn pending_ownership_requests(
        &self,
        request: PageRequest,
    ) -> Result<Page<OwnershipRequest>, AppError> {
        let (requests, total) = OwnershipRepository::new(self.db)
            .get_pending_paginated(request)
            .await?;

        Page::new(requests, total, request)
    }
}

fn parse_choice<T: Choice>(field: &str, value: &str) -> Result<T, ValidationError> {
    T::parse(value).ok_or_else(|| {
        ValidationError::new(
            field,
            format!(
                "\"{}\" is not a valid choice. Choose one of {}.",
                value,
                T::choices()
            ),
        )
    })
}
