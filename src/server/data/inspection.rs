use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        inspection::{CreateInspectionParam, Inspection, InspectionStatus},
        Choice,
    },
};

pub struct InspectionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InspectionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending inspection with its contact snapshots.
    pub async fn create(&self, param: CreateInspectionParam) -> Result<Inspection, AppError> {
        let now = Utc::now();
        let entity = entity::property_inspection::ActiveModel {
            property_id: ActiveValue::Set(param.property_id),
            agent_id: ActiveValue::Set(param.agent_id),
            agent_phone: ActiveValue::Set(param.agent_phone),
            agent_firstname: ActiveValue::Set(param.agent_firstname),
            agent_lastname: ActiveValue::Set(param.agent_lastname),
            company_name: ActiveValue::Set(param.company_name),
            client_id: ActiveValue::Set(param.client_id),
            client_phone: ActiveValue::Set(param.client_phone),
            client_firstname: ActiveValue::Set(param.client_firstname),
            client_lastname: ActiveValue::Set(param.client_lastname),
            inspection_date: ActiveValue::Set(param.inspection_date),
            status: ActiveValue::Set(InspectionStatus::Pending.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Inspection::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Inspection>, AppError> {
        entity::prelude::PropertyInspection::find_by_id(id)
            .one(self.db)
            .await?
            .map(Inspection::from_entity)
            .transpose()
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: InspectionStatus,
    ) -> Result<Inspection, AppError> {
        let model = entity::prelude::PropertyInspection::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Inspection with id {} not found",
                id
            )))?;

        let mut active_model: entity::property_inspection::ActiveModel = model.into();
        active_model.status = ActiveValue::Set(status.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Inspection::from_entity(active_model.update(self.db).await?)
    }

    /// Inspections assigned to an agent, latest inspection date first.
    pub async fn get_for_agent(&self, agent_id: i32) -> Result<Vec<Inspection>, AppError> {
        entity::prelude::PropertyInspection::find()
            .filter(entity::property_inspection::Column::AgentId.eq(agent_id))
            .order_by_desc(entity::property_inspection::Column::InspectionDate)
            .all(self.db)
            .await?
            .into_iter()
            .map(Inspection::from_entity)
            .collect()
    }

    /// Inspections booked by a client, latest inspection date first.
    pub async fn get_for_client(&self, client_id: i32) -> Result<Vec<Inspection>, AppError> {
        entity::prelude::PropertyInspection::find()
            .filter(entity::property_inspection::Column::ClientId.eq(client_id))
            .order_by_desc(entity::property_inspection::Column::InspectionDate)
            .all(self.db)
            .await?
            .into_iter()
            .map(Inspection::from_entity)
            .collect()
    }
}
