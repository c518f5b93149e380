use super::*;

/// Tests a partial listing update.
///
/// Expected: Ok with the new price and the untouched name
#[tokio::test]
async fn updates_only_supplied_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let created = factory::property::PropertyFactory::new(db, &agent, &company)
        .name("Garden Flats")
        .build()
        .await?;

    let repo = PropertyRepository::new(db);
    let updated = repo
        .update(
            created.id,
            PropertyFields {
                price_per_share: Some(2500),
                landmarks: Some(vec!["Market".to_string()]),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "Garden Flats");
    assert_eq!(updated.price_per_share, Some(2500));
    assert_eq!(updated.landmarks, vec!["Market"]);

    Ok(())
}

/// Tests replacing the scheduled stays.
///
/// Expected: Ok with the stored periods read back
#[tokio::test]
async fn replaces_scheduled_stays() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, created) = factory::helpers::create_marketplace_property(db).await?;
    let start = NaiveDate::from_ymd_opt(2026, 12, 20).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 12, 27).unwrap();

    let repo = PropertyRepository::new(db);
    let updated = repo.set_scheduled_stays(created.id, &[[start, end]]).await?;

    assert_eq!(updated.scheduled_stays, vec![[start, end]]);

    Ok(())
}

/// Tests recording a sale.
///
/// Expected: Ok with the new stage and percentage
#[tokio::test]
async fn records_sale() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, created) = factory::helpers::create_marketplace_property(db).await?;

    let repo = PropertyRepository::new(db);
    let sold = repo
        .record_sale(created.id, OwnershipStage::Marketplace, 35)
        .await?;

    assert_eq!(sold.stage, OwnershipStage::Marketplace);
    assert_eq!(sold.percentage_sold, 35);

    Ok(())
}

/// Tests updating a listing that does not exist.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_missing_property() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PropertyRepository::new(db);

    assert!(repo.set_archived(Uuid::new_v4(), true).await.is_err());

    Ok(())
}
