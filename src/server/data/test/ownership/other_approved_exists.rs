use super::*;

/// Tests detecting an earlier approval by the same requester role.
///
/// Verifies that the request under review is excluded and that approvals of
/// another role do not count.
///
/// Expected: Ok(true) only for the role with another approved request
#[tokio::test]
async fn detects_other_approval_of_same_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;

    factory::ownership::OwnershipFactory::new(db, property.id, customer.id)
        .status("APPROVED")
        .build()
        .await?;
    let under_review = factory::create_ownership_request(db, property.id, customer.id).await?;
    let agent_request = factory::ownership::OwnershipFactory::new(db, property.id, agent.id)
        .user_type("AGENT")
        .build()
        .await?;

    let repo = OwnershipRepository::new(db);

    assert!(
        repo.other_approved_exists(property.id, Role::Customer, under_review.id)
            .await?
    );
    assert!(
        !repo
            .other_approved_exists(property.id, Role::Agent, agent_request.id)
            .await?
    );

    Ok(())
}

/// Tests that the request itself is not counted.
///
/// Expected: Ok(false) when the only approved request is the excluded one
#[tokio::test]
async fn excludes_request_under_review() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;
    let approved = factory::ownership::OwnershipFactory::new(db, property.id, customer.id)
        .status("APPROVED")
        .build()
        .await?;

    let repo = OwnershipRepository::new(db);

    assert!(
        !repo
            .other_approved_exists(property.id, Role::Customer, approved.id)
            .await?
    );

    Ok(())
}
