use super::*;

/// Tests the agent's inspection list.
///
/// Verifies that the latest inspection date comes first.
///
/// Expected: Ok with the later visit first
#[tokio::test]
async fn orders_by_inspection_date_desc() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let client = factory::create_user(db).await?;
    let now = Utc::now();

    let soon = factory::inspection::InspectionFactory::new(db, &property, client.id)
        .inspection_date(now + Duration::days(1))
        .build()
        .await?;
    let later = factory::inspection::InspectionFactory::new(db, &property, client.id)
        .inspection_date(now + Duration::days(10))
        .build()
        .await?;

    let repo = InspectionRepository::new(db);
    let inspections = repo.get_for_agent(agent.id).await?;

    let ids: Vec<i32> = inspections.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![later.id, soon.id]);

    let client_view = repo.get_for_client(client.id).await?;
    assert_eq!(client_view.len(), 2);

    Ok(())
}
