use super::*;

/// Tests which listings appear on the marketplace.
///
/// Verifies that pending, rejected and archived listings are hidden and the
/// newest approved listing comes first.
///
/// Expected: Ok with the two approved, unarchived listings, newest first
#[tokio::test]
async fn returns_only_available_listings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let now = Utc::now();
    let older = factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .created_at(now - Duration::days(1))
        .build()
        .await?;
    factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .archived(true)
        .build()
        .await?;
    factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("REJECTED")
        .build()
        .await?;
    factory::create_property(db, &agent, &company).await?;

    let repo = PropertyRepository::new(db);
    let (properties, total) = repo
        .get_marketplace_paginated(&MarketplaceFilter::default(), PageRequest::new(None)?)
        .await?;

    assert_eq!(total, 2);
    let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests the location filters.
///
/// Verifies that city matching ignores case.
///
/// Expected: Ok with only the Abuja listing
#[tokio::test]
async fn filters_by_city_ignoring_case() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let abuja = factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .city(Some("Abuja".to_string()))
        .state("FCT")
        .build()
        .await?;
    factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .build()
        .await?;

    let repo = PropertyRepository::new(db);
    let filter = MarketplaceFilter {
        city: Some("aBUJA".to_string()),
        ..Default::default()
    };
    let (properties, total) = repo
        .get_marketplace_paginated(&filter, PageRequest::new(None)?)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(properties[0].id, abuja.id);

    Ok(())
}

/// Tests the ownership stage filter.
///
/// Expected: Ok with only the listing in the marketplace stage
#[tokio::test]
async fn filters_by_stage() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let resale = factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .stage("MARKETPLACE")
        .build()
        .await?;
    factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .build()
        .await?;

    let repo = PropertyRepository::new(db);
    let filter = MarketplaceFilter {
        stage: Some(OwnershipStage::Marketplace),
        ..Default::default()
    };
    let (properties, _) = repo
        .get_marketplace_paginated(&filter, PageRequest::new(None)?)
        .await?;

    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].id, resale.id);

    Ok(())
}
