use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        transaction::{CreateTransactionLogParam, TransactionLog},
        Choice,
    },
};

pub struct TransactionLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TransactionLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the logs of a settled cart in order.
    ///
    /// # Returns
    /// - `Ok(Vec<TransactionLog>)` - The created logs, same order as `params`
    /// - `Err(AppError)` - An insert failed
    pub async fn create_many(
        &self,
        params: Vec<CreateTransactionLogParam>,
    ) -> Result<Vec<TransactionLog>, AppError> {
        let mut logs = Vec::with_capacity(params.len());

        for param in params {
            let now = Utc::now();
            let entity = entity::transaction_log::ActiveModel {
                property_name: ActiveValue::Set(Some(param.property_name)),
                reference: ActiveValue::Set(param.reference),
                property_id: ActiveValue::Set(param.property_id),
                agent_id: ActiveValue::Set(param.agent_id),
                client_id: ActiveValue::Set(param.client_id),
                amount: ActiveValue::Set(param.amount),
                number_of_shares: ActiveValue::Set(param.number_of_shares),
                status: ActiveValue::Set(param.status.as_str().to_string()),
                payment_method: ActiveValue::Set(param.payment_method.as_str().to_string()),
                error_message_from_payment_service: ActiveValue::Set(param.error_message),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            logs.push(TransactionLog::from_entity(entity)?);
        }

        Ok(logs)
    }

    /// Logs of sales made by an agent, newest first.
    pub async fn get_for_agent(&self, agent_id: i32) -> Result<Vec<TransactionLog>, AppError> {
        entity::prelude::TransactionLog::find()
            .filter(entity::transaction_log::Column::AgentId.eq(agent_id))
            .order_by_desc(entity::transaction_log::Column::CreatedAt)
            .order_by_desc(entity::transaction_log::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(TransactionLog::from_entity)
            .collect()
    }

    /// Logs of purchases made by a client, newest first.
    pub async fn get_for_client(&self, client_id: i32) -> Result<Vec<TransactionLog>, AppError> {
        entity::prelude::TransactionLog::find()
            .filter(entity::transaction_log::Column::ClientId.eq(client_id))
            .order_by_desc(entity::transaction_log::Column::CreatedAt)
            .order_by_desc(entity::transaction_log::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(TransactionLog::from_entity)
            .collect()
    }
}
