use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory, factory::property::PropertyFactory};

use super::domain_user;
use crate::server::{
    error::AppError,
    model::transaction::TransactionStatus,
    service::{
        cart::CartService, notification::NotificationService, payment::FixedGateway,
        transaction::TransactionService,
    },
    util::pagination::PageRequest,
};

/// Tests buying a cart of two properties.
///
/// Verifies that each line is charged into its own log with the line subtotal, the
/// cart is emptied and both the buyer and each agent are notified.
///
/// Expected: Ok with two SUCCESS logs and unique references
#[tokio::test]
async fn purchase_cart_logs_each_item() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, company, first) = factory::helpers::create_marketplace_property(db).await?;
    let second = PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .price_per_share(Some(250))
        .build()
        .await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    factory::create_cart_item(db, customer.id, first.id, 2).await?;
    factory::create_cart_item(db, customer.id, second.id, 4).await?;

    let gateway = FixedGateway::new(TransactionStatus::Success, None);
    let service = TransactionService::new(db, &gateway);
    let logs = service.purchase_cart(&customer).await?;

    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|log| log.status == TransactionStatus::Success));
    assert!(logs.iter().all(|log| log.reference.starts_with("rfb_")));
    assert_ne!(logs[0].reference, logs[1].reference);
    let mut amounts: Vec<i64> = logs.iter().map(|log| log.amount).collect();
    amounts.sort_unstable();
    assert_eq!(amounts, vec![1000, 2000]);

    assert!(CartService::new(db)
        .list_cart(&customer)
        .await?
        .items
        .is_empty());

    let notifications = NotificationService::new(db);
    assert_eq!(notifications.unread_count(customer.id).await?, 2);
    let agent_page = notifications
        .list(agent.id, PageRequest::new(None)?)
        .await?;
    assert_eq!(agent_page.total, 2);
    assert!(agent_page.items.iter().all(|n| n
        .message
        .as_deref()
        .is_some_and(|m| m.starts_with("SUCCESS transaction for property"))));

    assert_eq!(service.client_transactions(customer.id).await?.len(), 2);
    assert_eq!(service.agent_transactions(agent.id).await?.len(), 2);

    Ok(())
}

/// Tests that a declined charge is still logged.
///
/// Expected: Ok with a FAILED log carrying the provider message
#[tokio::test]
async fn purchase_cart_records_failed_charges() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    factory::create_cart_item(db, customer.id, property.id, 1).await?;

    let gateway = FixedGateway::new(TransactionStatus::Failed, Some("Declined"));
    let logs = TransactionService::new(db, &gateway)
        .purchase_cart(&customer)
        .await?;

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, TransactionStatus::Failed);
    assert_eq!(logs[0].error_message.as_deref(), Some("Declined"));

    Ok(())
}

/// Tests checkout when the payment provider cannot be reached.
///
/// Verifies that nothing is committed: the cart keeps its line and no log or
/// notification is written.
///
/// Expected: Err, with the cart unchanged
#[tokio::test]
async fn purchase_cart_rolls_back_when_gateway_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    factory::create_cart_item(db, customer.id, property.id, 3).await?;

    let gateway = FixedGateway::unreachable();
    let service = TransactionService::new(db, &gateway);
    assert!(service.purchase_cart(&customer).await.is_err());

    let cart = CartService::new(db).list_cart(&customer).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert!(service.client_transactions(customer.id).await?.is_empty());
    assert_eq!(
        NotificationService::new(db)
            .unread_count(customer.id)
            .await?,
        0
    );

    Ok(())
}

/// Tests checking out an empty cart.
///
/// Expected: Err(BadRequest) "cart is empty"
#[tokio::test]
async fn purchase_cart_rejects_empty_cart() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let customer = domain_user(factory::create_user(db).await?)?;

    let gateway = FixedGateway::new(TransactionStatus::Success, None);
    let result = TransactionService::new(db, &gateway)
        .purchase_cart(&customer)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "cart is empty"));

    Ok(())
}

/// Tests transaction history ordering.
///
/// Expected: Ok with the newest log first, for the right client only
#[tokio::test]
async fn transaction_history_is_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let old = factory::create_transaction_log(
        db,
        &property,
        customer.id,
        "SUCCESS",
        Utc::now() - Duration::days(2),
    )
    .await?;
    let new = factory::create_transaction_log(db, &property, customer.id, "PENDING", Utc::now())
        .await?;
    factory::create_transaction_log(db, &property, other.id, "FAILED", Utc::now()).await?;

    let gateway = FixedGateway::new(TransactionStatus::Success, None);
    let service = TransactionService::new(db, &gateway);

    let history = service.client_transactions(customer.id).await?;
    let ids: Vec<i32> = history.iter().map(|log| log.id).collect();
    assert_eq!(ids, vec![new.id, old.id]);
    assert_eq!(history[0].status, TransactionStatus::Pending);

    assert_eq!(service.agent_transactions(agent.id).await?.len(), 3);

    Ok(())
}

/// Tests checkout after a listing in the cart was archived.
///
/// Verifies that the withdrawn listing is not charged and the cart is kept.
///
/// Expected: Err(BadRequest) and the cart line still present
#[tokio::test]
async fn purchase_cart_rejects_withdrawn_listing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let archived = PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .archived(true)
        .price_per_share(Some(1000))
        .build()
        .await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    factory::create_cart_item(db, customer.id, archived.id, 1).await?;

    let gateway = FixedGateway::unreachable();
    let result = TransactionService::new(db, &gateway)
        .purchase_cart(&customer)
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg.ends_with("is not available for purchase")
    ));
    assert_eq!(CartService::new(db).list_cart(&customer).await?.items.len(), 1);

    Ok(())
}

/// Tests checkout of a line whose amount does not fit in an `i64`.
///
/// Expected: Err(ValidationErr) on `quantity` before any charge, cart unchanged
#[tokio::test]
async fn purchase_cart_rejects_overflowing_amount() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let property = PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .price_per_share(Some(i64::MAX))
        .build()
        .await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    factory::create_cart_item(db, customer.id, property.id, 2).await?;

    let gateway = FixedGateway::unreachable();
    let result = TransactionService::new(db, &gateway)
        .purchase_cart(&customer)
        .await;

    assert!(matches!(
        result,
        Err(AppError::ValidationErr(e)) if e.field == "quantity"
    ));
    assert_eq!(CartService::new(db).list_cart(&customer).await?.items.len(), 1);

    Ok(())
}
