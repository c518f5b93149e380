use super::*;

/// Tests the moderation queue.
///
/// Verifies only pending listings are returned, oldest first.
///
/// Expected: Ok with the two pending listings in creation order
#[tokio::test]
async fn returns_pending_oldest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let now = Utc::now();
    let newer = factory::property::PropertyFactory::new(db, &agent, &company)
        .created_at(now - Duration::hours(1))
        .build()
        .await?;
    let older = factory::property::PropertyFactory::new(db, &agent, &company)
        .created_at(now - Duration::hours(5))
        .build()
        .await?;
    factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .build()
        .await?;

    let repo = PropertyRepository::new(db);
    let (properties, total) = repo.get_pending_paginated(PageRequest::new(None)?).await?;

    assert_eq!(total, 2);
    let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);

    Ok(())
}

/// Tests that an approved listing leaves the queue.
///
/// Expected: Ok with an empty queue after approval
#[tokio::test]
async fn approved_listing_leaves_queue() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let pending = factory::create_property(db, &agent, &company).await?;

    let repo = PropertyRepository::new(db);
    let approved = repo
        .set_moderation_status(pending.id, ModerationStatus::Approved)
        .await?;
    assert!(approved.is_available());

    let (properties, total) = repo.get_pending_paginated(PageRequest::new(None)?).await?;
    assert!(properties.is_empty());
    assert_eq!(total, 0);

    Ok(())
}
