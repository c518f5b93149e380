use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{cart::CartRepository, property::PropertyRepository},
    error::{validation::ValidationError, AppError},
    model::{
        cart::{Cart, CartItem},
        property::Property,
        user::User,
    },
};

/// Message for a quantity whose price does not fit in an amount.
pub(crate) const SUBTOTAL_OVERFLOW: &str = "quantity is too large for the price of this property";

pub struct CartService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CartService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds shares of a property to the customer's cart.
    ///
    /// Adding a property already in the cart sums the quantities.
    ///
    /// # Arguments
    /// - `customer` - The cart owner
    /// - `property_id` - Property to buy shares of
    /// - `quantity` - Shares to add, at least 1
    ///
    /// # Returns
    /// - `Ok(CartItem)` - The created or updated cart item
    /// - `Err(AppError::NotFound)` - No property with that id
    /// - `Err(AppError::BadRequest)` - The property cannot be bought
    /// - `Err(AppError::ValidationErr)` - The quantity is out of range
    pub async fn add_to_cart(
        &self,
        customer: &User,
        property_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        validate_quantity(quantity)?;

        let property = PropertyRepository::new(self.db)
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No property with that ID".to_string()))?;
        if !property.is_available() {
            return Err(AppError::BadRequest(
                "property is not available for purchase".to_string(),
            ));
        }
        if property.price_per_share.is_none() {
            return Err(AppError::BadRequest(
                "property has no price per share".to_string(),
            ));
        }

        let cart_repo = CartRepository::new(self.db);
        let existing = cart_repo.find_for_property(customer.id, property_id).await?;
        let total_quantity = existing
            .as_ref()
            .map_or(quantity, |item| item.quantity.saturating_add(quantity));
        check_available_shares(&property, total_quantity)?;
        check_subtotal(&property, total_quantity)?;

        let item = match existing {
            Some(item) => cart_repo.set_quantity(item.id, total_quantity).await?,
            None => cart_repo.create(customer.id, property_id, quantity).await?,
        };

        Ok(item)
    }

    pub async fn list_cart(&self, customer: &User) -> Result<Cart, AppError> {
        Ok(CartRepository::new(self.db).get_cart(customer.id).await?)
    }

    /// Sets the quantity of one of the customer's cart items.
    pub async fn update_cart_item(
        &self,
        customer: &User,
        item_id: i32,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        validate_quantity(quantity)?;
        let item = self.owned_item(customer, item_id).await?;

        if let Some(property) = PropertyRepository::new(self.db)
            .find_by_id(item.property_id)
            .await?
        {
            check_available_shares(&property, quantity)?;
            check_subtotal(&property, quantity)?;
        }

        Ok(CartRepository::new(self.db)
            .set_quantity(item.id, quantity)
            .await?)
    }

    pub async fn remove_cart_item(&self, customer: &User, item_id: i32) -> Result<(), AppError> {
        let item = self.owned_item(customer, item_id).await?;

        Ok(CartRepository::new(self.db).delete(item.id).await?)
    }

    async fn owned_item(&self, customer: &User, item_id: i32) -> Result<CartItem, AppError> {
        CartRepository::new(self.db)
            .get_item(item_id)
            .await?
            .filter(|item| item.user_id == customer.id)
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))
    }
}

fn validate_quantity(quantity: i32) -> Result<(), ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::new(
            "quantity",
            "Ensure this value is greater than or equal to 1.",
        ));
    }
    Ok(())
}

fn check_available_shares(property: &Property, quantity: i32) -> Result<(), ValidationError> {
    match property.total_number_of_shares {
        Some(total) if quantity > total => Err(ValidationError::new(
            "quantity",
            format!("quantity cannot exceed the {} shares of this property", total),
        )),
        _ => Ok(()),
    }
}

fn check_subtotal(property: &Property, quantity: i32) -> Result<(), ValidationError> {
    property
        .price_per_share
        .unwrap_or(0)
        .checked_mul(i64::from(quantity))
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("quantity", SUBTOTAL_OVERFLOW))
}
