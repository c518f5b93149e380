//! Shopping cart factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Puts `quantity` shares of a property in a user's cart.
pub async fn create_cart_item(
    db: &DatabaseConnection,
    user_id: i32,
    property_id: Uuid,
    quantity: i32,
) -> Result<entity::shopping_cart::Model, DbErr> {
    let now = Utc::now();
    entity::shopping_cart::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(user_id),
        property_id: ActiveValue::Set(property_id),
        quantity: ActiveValue::Set(quantity),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
