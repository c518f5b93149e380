use super::*;

/// Tests adding a cart line.
///
/// Verifies that the returned line carries the property summary and its subtotal.
///
/// Expected: Ok with name, price and a subtotal of 3 * 1000
#[tokio::test]
async fn creates_line_with_property_summary() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;

    let repo = CartRepository::new(db);
    let item = repo.create(customer.id, property.id, 3).await?;

    assert_eq!(item.property_name, property.name);
    assert_eq!(item.agent_id, agent.id);
    assert_eq!(item.price_per_share, Some(1000));
    assert_eq!(item.subtotal(), Some(3000));

    let found = repo.find_for_property(customer.id, property.id).await?;
    assert_eq!(found.map(|i| i.id), Some(item.id));

    Ok(())
}

/// Tests changing the quantity of a line.
///
/// Expected: Ok with the new quantity
#[tokio::test]
async fn sets_quantity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;
    let line = factory::create_cart_item(db, customer.id, property.id, 1).await?;

    let repo = CartRepository::new(db);
    let item = repo.set_quantity(line.id, 7).await?;

    assert_eq!(item.quantity, 7);

    Ok(())
}

/// Tests removing a line.
///
/// Expected: Ok with the line gone
#[tokio::test]
async fn deletes_line() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;
    let line = factory::create_cart_item(db, customer.id, property.id, 1).await?;

    let repo = CartRepository::new(db);
    repo.delete(line.id).await?;

    assert!(repo.get_item(line.id).await?.is_none());

    Ok(())
}
