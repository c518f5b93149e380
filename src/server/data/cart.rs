use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::cart::{Cart, CartItem};

pub struct CartRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CartRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a cart line.
    pub async fn create(
        &self,
        user_id: i32,
        property_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, DbErr> {
        let now = Utc::now();
        let entity = entity::shopping_cart::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            property_id: ActiveValue::Set(property_id),
            quantity: ActiveValue::Set(quantity),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.get_item(entity.id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Cart item with id {} not found after creation",
                entity.id
            )))
    }

    /// Finds the user's cart line for a property, if any.
    pub async fn find_for_property(
        &self,
        user_id: i32,
        property_id: Uuid,
    ) -> Result<Option<CartItem>, DbErr> {
        let result = entity::prelude::ShoppingCart::find()
            .filter(entity::shopping_cart::Column::UserId.eq(user_id))
            .filter(entity::shopping_cart::Column::PropertyId.eq(property_id))
            .find_also_related(entity::prelude::Property)
            .one(self.db)
            .await?;

        result.map(join_item).transpose()
    }

    /// Gets a cart line with its property summary.
    pub async fn get_item(&self, item_id: i32) -> Result<Option<CartItem>, DbErr> {
        let result = entity::prelude::ShoppingCart::find_by_id(item_id)
            .find_also_related(entity::prelude::Property)
            .one(self.db)
            .await?;

        result.map(join_item).transpose()
    }

    /// Gets all lines of a user's cart in the order they were added.
    pub async fn get_cart(&self, user_id: i32) -> Result<Cart, DbErr> {
        let items = entity::prelude::ShoppingCart::find()
            .filter(entity::shopping_cart::Column::UserId.eq(user_id))
            .order_by_asc(entity::shopping_cart::Column::Id)
            .find_also_related(entity::prelude::Property)
            .all(self.db)
            .await?
            .into_iter()
            .map(join_item)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart { items })
    }

    pub async fn set_quantity(&self, item_id: i32, quantity: i32) -> Result<CartItem, DbErr> {
        let model = entity::prelude::ShoppingCart::find_by_id(item_id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Cart item with id {} not found",
                item_id
            )))?;

        let mut active_model: entity::shopping_cart::ActiveModel = model.into();
        active_model.quantity = ActiveValue::Set(quantity);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await?;

        self.get_item(item_id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Cart item with id {} not found",
                item_id
            )))
    }

    pub async fn delete(&self, item_id: i32) -> Result<(), DbErr> {
        entity::prelude::ShoppingCart::delete_by_id(item_id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}

fn join_item(
    (item, property): (entity::shopping_cart::Model, Option<entity::property::Model>),
) -> Result<CartItem, DbErr> {
    let property = property.ok_or(DbErr::RecordNotFound(format!(
        "Property {} of cart item {} not found",
        item.property_id, item.id
    )))?;

    Ok(CartItem::from_entity(item, &property))
}
