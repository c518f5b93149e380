use test_utils::{builder::TestBuilder, factory, factory::property::PropertyFactory};

use super::domain_user;
use crate::server::{error::AppError, service::cart::CartService};

/// Tests adding the same property to the cart twice.
///
/// Verifies that the second add sums into the existing line instead of creating a
/// new one.
///
/// Expected: Ok with one line of 5 shares and a total of 5000
#[tokio::test]
async fn add_to_cart_sums_quantities() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    let service = CartService::new(db);

    let first = service.add_to_cart(&customer, property.id, 2).await?;
    let second = service.add_to_cart(&customer, property.id, 3).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 5);

    let cart = service.list_cart(&customer).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total(), Some(5000));

    Ok(())
}

/// Tests which properties can be put in a cart.
///
/// Verifies that unknown, pending, archived and unpriced listings are refused.
///
/// Expected: Err(NotFound), then Err(BadRequest) with the matching messages
#[tokio::test]
async fn add_to_cart_rejects_unavailable_properties() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    let service = CartService::new(db);

    let result = service.add_to_cart(&customer, uuid::Uuid::new_v4(), 1).await;
    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "No property with that ID"));

    let pending = PropertyFactory::new(db, &agent, &company)
        .price_per_share(Some(1000))
        .build()
        .await?;
    let archived = PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .archived(true)
        .price_per_share(Some(1000))
        .build()
        .await?;
    for property in [pending, archived] {
        let result = service.add_to_cart(&customer, property.id, 1).await;
        assert!(matches!(
            result,
            Err(AppError::BadRequest(msg)) if msg == "property is not available for purchase"
        ));
    }

    let unpriced = PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .build()
        .await?;
    let result = service.add_to_cart(&customer, unpriced.id, 1).await;
    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg == "property has no price per share"
    ));

    Ok(())
}

/// Tests quantity limits.
///
/// Verifies that zero is refused and that the running total cannot pass the share
/// count of the listing.
///
/// Expected: Err(ValidationErr) on `quantity`
#[tokio::test]
async fn add_to_cart_checks_quantity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = domain_user(factory::create_user(db).await?)?;
    let service = CartService::new(db);

    assert!(matches!(
        service.add_to_cart(&customer, property.id, 0).await,
        Err(AppError::ValidationErr(e)) if e.field == "quantity"
    ));

    service.add_to_cart(&customer, property.id, 90).await?;
    assert!(matches!(
        service.add_to_cart(&customer, property.id, 11).await,
        Err(AppError::ValidationErr(e)) if e.field == "quantity"
    ));

    Ok(())
}

/// Tests changing and removing cart lines.
///
/// Verifies that customers can only touch their own lines.
///
/// Expected: Ok for the owner, Err(NotFound) "Cart item not found" for anyone else
#[tokio::test]
async fn cart_items_are_owner_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let owner = domain_user(factory::create_user(db).await?)?;
    let other = domain_user(factory::create_user(db).await?)?;
    let item = factory::create_cart_item(db, owner.id, property.id, 1).await?;
    let service = CartService::new(db);

    let result = service.update_cart_item(&other, item.id, 4).await;
    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Cart item not found"));
    let result = service.remove_cart_item(&other, item.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let updated = service.update_cart_item(&owner, item.id, 4).await?;
    assert_eq!(updated.quantity, 4);
    assert!(matches!(
        service.update_cart_item(&owner, item.id, 101).await,
        Err(AppError::ValidationErr(_))
    ));

    service.remove_cart_item(&owner, item.id).await?;
    assert!(service.list_cart(&owner).await?.items.is_empty());

    Ok(())
}

/// Tests a listing priced so high that two shares overflow the line amount.
///
/// Verifies that the quantity is refused instead of wrapping, and that a cart holding
/// the single share still lists.
///
/// Expected: Err(ValidationErr) on `quantity`, then Ok with one share
#[tokio::test]
async fn add_to_cart_rejects_overflowing_subtotal() -> Result<(), AppError> {
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
    let service = CartService::new(db);

    assert!(matches!(
        service.add_to_cart(&customer, property.id, 2).await,
        Err(AppError::ValidationErr(e)) if e.field == "quantity"
    ));

    let item = service.add_to_cart(&customer, property.id, 1).await?;
    assert!(matches!(
        service.update_cart_item(&customer, item.id, 3).await,
        Err(AppError::ValidationErr(e)) if e.field == "quantity"
    ));

    let cart = service.list_cart(&customer).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total(), Some(i64::MAX));

    Ok(())
}
