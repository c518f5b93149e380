use super::*;

/// Tests loading a user's cart.
///
/// Verifies that lines of other users are left out and the total sums every
/// line's subtotal.
///
/// Expected: Ok with two lines totalling 5000
#[tokio::test]
async fn returns_own_lines_with_total() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company, first) = factory::helpers::create_marketplace_property(db).await?;
    let second = factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .price_per_share(Some(1500))
        .build()
        .await?;
    let customer = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    factory::create_cart_item(db, customer.id, first.id, 2).await?;
    factory::create_cart_item(db, customer.id, second.id, 2).await?;
    factory::create_cart_item(db, other.id, first.id, 9).await?;

    let repo = CartRepository::new(db);
    let cart = repo.get_cart(customer.id).await?;

    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.items[0].property_id, first.id);
    assert_eq!(cart.total(), Some(2 * 1000 + 2 * 1500));

    Ok(())
}

/// Tests an empty cart.
///
/// Expected: Ok with no lines and a zero total
#[tokio::test]
async fn empty_cart_has_zero_total() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_user(db).await?;

    let repo = CartRepository::new(db);
    let cart = repo.get_cart(customer.id).await?;

    assert!(cart.items.is_empty());
    assert_eq!(cart.total(), Some(0));

    Ok(())
}
