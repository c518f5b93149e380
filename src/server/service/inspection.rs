use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{
        inspection::InspectionRepository, notification::NotificationRepository,
        property::PropertyRepository, user::UserRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        inspection::{CreateInspectionParam, Inspection, InspectionStatus},
        notification::NewNotification,
        property::ModerationStatus,
        user::{Role, User},
        Choice,
    },
    util::date,
};

pub struct InspectionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InspectionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a site visit and notifies the listing agent.
    ///
    /// Contact details of both parties and the company name are copied onto the
    /// inspection at booking time.
    ///
    /// # Arguments
    /// - `client` - The customer booking the visit
    /// - `property_id` - Property to visit
    /// - `inspection_date` - `YYYY-MM-DD HH:MM:SS` or RFC 3339 timestamp
    ///
    /// # Returns
    /// - `Ok(Inspection)` - The pending inspection
    /// - `Err(AppError::ValidationErr)` - The date is invalid or not in the future
    /// - `Err(AppError::NotFound)` - No property with that id
    /// - `Err(AppError::BadRequest)` - The property is not approved
    pub async fn schedule_inspection(
        &self,
        client: &User,
        property_id: Uuid,
        inspection_date: &str,
    ) -> Result<Inspection, AppError> {
        let when = date::parse_datetime(inspection_date).ok_or_else(|| {
            ValidationError::new(
                "inspection_date",
                "inspection_date must contain valid datetime string",
            )
        })?;
        if !date::greater_than_now(inspection_date) {
            return Err(ValidationError::new(
                "inspection_date",
                "inspection_date must be a future date",
            )
            .into());
        }

        let property = PropertyRepository::new(self.db)
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No property with that ID".to_string()))?;
        if property.moderation_status != ModerationStatus::Approved {
            return Err(AppError::BadRequest(
                "property is not available for inspection".to_string(),
            ));
        }

        let agent = UserRepository::new(self.db)
            .find_by_id(property.agent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;

        let txn = self.db.begin().await?;
        let inspection = InspectionRepository::new(&txn)
            .create(CreateInspectionParam {
                property_id,
                agent_id: agent.id,
                agent_phone: agent.phone,
                agent_firstname: Some(agent.firstname),
                agent_lastname: Some(agent.lastname),
                company_name: Some(property.company_name),
                client_id: client.id,
                client_phone: client.phone.clone(),
                client_firstname: Some(client.firstname.clone()),
                client_lastname: Some(client.lastname.clone()),
                inspection_date: when,
            })
            .await?;
        NotificationRepository::new(&txn)
            .create(NewNotification::new(
                agent.id,
                Role::Agent,
                format!(
                    "New inspection request for property {} on {}",
                    property.name,
                    date::readable_datetime(when)
                ),
            ))
            .await?;
        txn.commit().await?;

        Ok(inspection)
    }

    pub async fn agent_inspections(&self, agent_id: i32) -> Result<Vec<Inspection>, AppError> {
        InspectionRepository::new(self.db)
            .get_for_agent(agent_id)
            .await
    }

    pub async fn client_inspections(&self, client_id: i32) -> Result<Vec<Inspection>, AppError> {
        InspectionRepository::new(self.db)
            .get_for_client(client_id)
            .await
    }

    /// Accepts or rejects a pending inspection and notifies the client.
    ///
    /// # Arguments
    /// - `agent` - The agent the inspection was booked with
    /// - `id` - Inspection id
    /// - `status` - `ACCEPTED` or `REJECTED`
    ///
    /// # Returns
    /// - `Ok(Inspection)` - The updated inspection
    /// - `Err(AppError::ValidationErr)` - Any other status
    /// - `Err(AppError::NotFound)` - No inspection with that id
    /// - `Err(AppError::Forbidden)` - The inspection belongs to another agent
    /// - `Err(AppError::BadRequest)` - The inspection is no longer pending
    pub async fn respond_to_inspection(
        &self,
        agent: &User,
        id: i32,
        status: &str,
    ) -> Result<Inspection, AppError> {
        let status = InspectionStatus::parse(status)
            .filter(|status| matches!(status, InspectionStatus::Accepted | InspectionStatus::Rejected))
            .ok_or_else(|| {
                ValidationError::new(
                    "status",
                    format!("\"{}\" is not a valid choice. Choose ACCEPTED or REJECTED.", status),
                )
            })?;

        let inspection = self.find(id).await?;
        if inspection.agent_id != agent.id {
            return Err(AppError::Forbidden(
                "This resource belongs to another user".to_string(),
            ));
        }
        if inspection.status != InspectionStatus::Pending {
            return Err(AppError::BadRequest(
                "inspection is no longer pending".to_string(),
            ));
        }

        let property_name = self.property_name(inspection.property_id).await?;

        let txn = self.db.begin().await?;
        let updated = InspectionRepository::new(&txn)
            .set_status(id, status)
            .await?;
        NotificationRepository::new(&txn)
            .create(NewNotification::new(
                inspection.client_id,
                Role::Customer,
                format!(
                    "Your inspection for property {} on {} was {}",
                    property_name,
                    date::readable_datetime(inspection.inspection_date),
                    status.as_str()
                ),
            ))
            .await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Cancels a pending or accepted inspection of the client and notifies the agent.
    pub async fn cancel_inspection(&self, client: &User, id: i32) -> Result<Inspection, AppError> {
        let inspection = self.find(id).await?;
        if inspection.client_id != client.id {
            return Err(AppError::Forbidden(
                "This resource belongs to another user".to_string(),
            ));
        }
        if !matches!(
            inspection.status,
            InspectionStatus::Pending | InspectionStatus::Accepted
        ) {
            return Err(AppError::BadRequest(
                "inspection can no longer be cancelled".to_string(),
            ));
        }

        let property_name = self.property_name(inspection.property_id).await?;

        let txn = self.db.begin().await?;
        let updated = InspectionRepository::new(&txn)
            .set_status(id, InspectionStatus::Cancelled)
            .await?;
        NotificationRepository::new(&txn)
            .create(NewNotification::new(
                inspection.agent_id,
                Role::Agent,
                format!(
                    "Inspection for property {} on {} was cancelled",
                    property_name,
                    date::readable_datetime(inspection.inspection_date)
                ),
            ))
            .await?;
        txn.commit().await?;

        Ok(updated)
    }

    async fn find(&self, id: i32) -> Result<Inspection, AppError> {
        InspectionRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inspection not found".to_string()))
    }

    async fn property_name(&self, property_id: Uuid) -> Result<String, AppError> {
        Ok(PropertyRepository::new(self.db)
            .find_by_id(property_id)
            .await?
            .map(|property| property.name)
            .unwrap_or_else(|| property_id.to_string()))
    }
}
