//! Transaction log factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a settled transaction for one cart line.
///
/// # Arguments
/// - `property` - Purchased listing; its agent is recorded on the log
/// - `client_id` - Buying customer
/// - `status` - `"PENDING"`, `"SUCCESS"` or `"FAILED"`
/// - `created_at` - Log timestamp, for ordering tests
pub async fn create_transaction_log(
    db: &DatabaseConnection,
    property: &entity::property::Model,
    client_id: i32,
    status: &str,
    created_at: DateTime<Utc>,
) -> Result<entity::transaction_log::Model, DbErr> {
    entity::transaction_log::ActiveModel {
        id: ActiveValue::NotSet,
        property_name: ActiveValue::Set(Some(property.name.clone())),
        reference: ActiveValue::Set(format!("rfb_test{:06}", next_id())),
        property_id: ActiveValue::Set(property.id),
        agent_id: ActiveValue::Set(property.agent_id),
        client_id: ActiveValue::Set(client_id),
        amount: ActiveValue::Set(property.price_per_share.unwrap_or(0)),
        number_of_shares: ActiveValue::Set(1),
        status: ActiveValue::Set(status.to_string()),
        payment_method: ActiveValue::Set("PAYSTACK".to_string()),
        error_message_from_payment_service: ActiveValue::Set(None),
        created_at: ActiveValue::Set(created_at),
        updated_at: ActiveValue::Set(created_at),
    }
    .insert(db)
    .await
}
