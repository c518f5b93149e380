use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::cart::{CartDto, CartItemDto, CartPropertyDto};

/// A cart row joined with the listing it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub property_id: Uuid,
    pub property_name: String,
    pub agent_id: i32,
    pub price_per_share: Option<i64>,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn from_entity(
        entity: entity::shopping_cart::Model,
        property: &entity::property::Model,
    ) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            property_id: entity.property_id,
            property_name: property.name.clone(),
            agent_id: property.agent_id,
            price_per_share: property.price_per_share,
            quantity: entity.quantity,
            created_at: entity.created_at,
        }
    }

    /// `quantity * price_per_share`, zero for unpriced listings. `None` when the
    /// product does not fit in an `i64`.
    pub fn subtotal(&self) -> Option<i64> {
        self.price_per_share
            .unwrap_or(0)
            .checked_mul(i64::from(self.quantity))
    }

    pub fn into_dto(self) -> CartItemDto {
        let subtotal = self.subtotal().unwrap_or(i64::MAX);
        CartItemDto {
            id: self.id,
            property: CartPropertyDto {
                id: self.property_id,
                name: self.property_name,
                price_per_share: self.price_per_share,
            },
            quantity: self.quantity,
            subtotal,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Sum of every subtotal, `None` on overflow.
    pub fn total(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |total, item| total.checked_add(item.subtotal()?))
    }

    pub fn into_dto(self) -> CartDto {
        let total = self.total().unwrap_or(i64::MAX);
        CartDto {
            items: self.items.into_iter().map(CartItem::into_dto).collect(),
            total,
        }
    }
}
