use super::*;

/// Tests filing an ownership request.
///
/// Verifies the request starts pending and shows up in the pending checks and
/// the moderation queue.
///
/// Expected: Ok with a PENDING request visible to `has_pending`
#[tokio::test]
async fn creates_pending_request() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;

    let repo = OwnershipRepository::new(db);
    let request = repo
        .create(CreateOwnershipRequestParam {
            property_id: property.id,
            user_id: customer.id,
            user_type: Role::Customer,
            percentage_ownership: 20,
        })
        .await?;

    assert_eq!(request.status, OwnershipStatus::Pending);
    assert_eq!(request.percentage_ownership, 20);
    assert!(repo.has_pending(customer.id, property.id).await?);

    let (pending, total) = repo.get_pending_paginated(PageRequest::new(None)?).await?;
    assert_eq!(total, 1);
    assert_eq!(pending[0].id, request.id);

    Ok(())
}

/// Tests that a decided request no longer counts as pending.
///
/// Expected: Ok(false) from `has_pending` after rejection
#[tokio::test]
async fn rejected_request_is_not_pending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;
    let request = factory::create_ownership_request(db, property.id, customer.id).await?;

    let repo = OwnershipRepository::new(db);
    let rejected = repo
        .set_status(request.id, OwnershipStatus::Rejected)
        .await?;

    assert_eq!(rejected.status, OwnershipStatus::Rejected);
    assert!(!repo.has_pending(customer.id, property.id).await?);
    assert_eq!(repo.get_for_user(customer.id).await?.len(), 1);

    Ok(())
}
