use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        cart::CartRepository, notification::NotificationRepository,
        property::PropertyRepository, transaction::TransactionLogRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        notification::NewNotification,
        transaction::{CreateTransactionLogParam, TransactionLog},
        user::{Role, User},
        Choice,
    },
    service::{
        cart::SUBTOTAL_OVERFLOW,
        payment::{ChargeRequest, PaymentGateway},
    },
    util::random,
};

pub struct TransactionService<'a> {
    db: &'a DatabaseConnection,
    payment: &'a dyn PaymentGateway,
}

impl<'a> TransactionService<'a> {
    /// Creates a new TransactionService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `payment` - Gateway charging each cart item
    ///
    /// # Returns
    /// - `TransactionService` - New service instance
    pub fn new(db: &'a DatabaseConnection, payment: &'a dyn PaymentGateway) -> Self {
        Self { db, payment }
    }

    /// Buys every item in the customer's cart.
    ///
    /// Each item is charged separately and becomes one transaction log. The cart is
    /// emptied, the logs written and both parties notified in a single database
    /// transaction, so a failed charge or write leaves the cart as it was.
    ///
    /// # Arguments
    /// - `customer` - The buyer
    ///
    /// # Returns
    /// - `Ok(Vec<TransactionLog>)` - One log per purchased cart item
    /// - `Err(AppError::BadRequest)` - The cart is empty, or a listing in it was
    ///   withdrawn after it was added
    /// - `Err(AppError::ValidationErr)` - An item's price does not fit in an amount
    /// - `Err(AppError)` - The gateway or a write failed and nothing was stored
    pub async fn purchase_cart(&self, customer: &User) -> Result<Vec<TransactionLog>, AppError> {
        let txn = self.db.begin().await?;
        let cart_repo = CartRepository::new(&txn);
        let property_repo = PropertyRepository::new(&txn);

        let cart = cart_repo.get_cart(customer.id).await?;
        if cart.items.is_empty() {
            return Err(AppError::BadRequest("cart is empty".to_string()));
        }

        let mut logs = Vec::with_capacity(cart.items.len());
        let mut notifications = Vec::with_capacity(cart.items.len() * 2);

        for item in cart.items {
            let available = property_repo
                .find_by_id(item.property_id)
                .await?
                .is_some_and(|property| property.is_available());
            if !available {
                return Err(AppError::BadRequest(format!(
                    "property {} is not available for purchase",
                    item.property_id
                )));
            }
            let amount = item
                .subtotal()
                .ok_or_else(|| ValidationError::new("quantity", SUBTOTAL_OVERFLOW))?;

            let reference = random::transaction_reference();
            cart_repo.delete(item.id).await?;

            let outcome = self
                .payment
                .charge(ChargeRequest {
                    reference: reference.clone(),
                    email: customer.email.clone(),
                    amount,
                })
                .await?;

            let message = format!(
                "{} transaction for property {}",
                outcome.status.as_str(),
                item.property_id
            );
            notifications.push(NewNotification::new(customer.id, customer.role, &message));
            notifications.push(NewNotification::new(item.agent_id, Role::Agent, message));

            logs.push(CreateTransactionLogParam {
                property_name: item.property_name,
                reference,
                property_id: item.property_id,
                agent_id: item.agent_id,
                client_id: customer.id,
                amount,
                number_of_shares: item.quantity,
                status: outcome.status,
                payment_method: outcome.payment_method,
                error_message: outcome.error_message,
            });
        }

        let logs = TransactionLogRepository::new(&txn).create_many(logs).await?;
        NotificationRepository::new(&txn)
            .create_many(notifications)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Customer {} purchased {} cart item(s)",
            customer.id,
            logs.len()
        );

        Ok(logs)
    }

    pub async fn agent_transactions(&self, agent_id: i32) -> Result<Vec<TransactionLog>, AppError> {
        TransactionLogRepository::new(self.db)
            .get_for_agent(agent_id)
            .await
    }

    pub async fn client_transactions(
        &self,
        client_id: i32,
    ) -> Result<Vec<TransactionLog>, AppError> {
        TransactionLogRepository::new(self.db)
            .get_for_client(client_id)
            .await
    }
}
