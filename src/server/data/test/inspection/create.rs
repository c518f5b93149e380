use super::*;

/// Tests booking an inspection.
///
/// Verifies the contact snapshot is stored as given and the booking starts
/// pending.
///
/// Expected: Ok with PENDING status and the snapshot fields
#[tokio::test]
async fn creates_pending_inspection_with_snapshot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company, property) = factory::helpers::create_marketplace_property(db).await?;
    let client = factory::create_user(db).await?;
    let date = Utc::now() + Duration::days(3);

    let repo = InspectionRepository::new(db);
    let inspection = repo
        .create(CreateInspectionParam {
            property_id: property.id,
            agent_id: agent.id,
            agent_phone: agent.phone.clone(),
            agent_firstname: Some(agent.firstname.clone()),
            agent_lastname: Some(agent.lastname.clone()),
            company_name: Some(company.display_name.clone()),
            client_id: client.id,
            client_phone: None,
            client_firstname: Some(client.firstname.clone()),
            client_lastname: Some(client.lastname.clone()),
            inspection_date: date,
        })
        .await?;

    assert_eq!(inspection.status, InspectionStatus::Pending);
    assert_eq!(inspection.company_name, Some(company.display_name));
    assert_eq!(inspection.client_firstname, Some(client.firstname));

    let found = repo.find_by_id(inspection.id).await?;
    assert_eq!(found.map(|i| i.agent_id), Some(agent.id));

    Ok(())
}

/// Tests changing an inspection's status.
///
/// Expected: Ok with ACCEPTED status
#[tokio::test]
async fn sets_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let client = factory::create_user(db).await?;
    let booked = factory::create_inspection(db, &property, client.id).await?;

    let repo = InspectionRepository::new(db);
    let accepted = repo
        .set_status(booked.id, InspectionStatus::Accepted)
        .await?;

    assert_eq!(accepted.status, InspectionStatus::Accepted);

    Ok(())
}
