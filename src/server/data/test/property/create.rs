use super::*;

/// Tests creating a listing.
///
/// Verifies that a new listing starts pending in the listing stage, copies the
/// company name and stores its lists.
///
/// Expected: Ok with PENDING, LISTING, IN-PROGRESS and the given amenities
#[tokio::test]
async fn creates_pending_listing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;

    let repo = PropertyRepository::new(db);
    let id = Uuid::new_v4();
    let property = repo
        .create(CreatePropertyParam {
            id,
            agent_id: agent.id,
            company_id: company.id,
            company_name: company.display_name.clone(),
            fields: PropertyFields {
                name: Some("Lekki Terrace".to_string()),
                amenities: Some(vec!["Pool".to_string(), "Gym".to_string()]),
                price_per_share: Some(5000),
                ..Default::default()
            },
            image_album_id: None,
            document_album_id: None,
            default_image: None,
        })
        .await?;

    assert_eq!(property.id, id);
    assert_eq!(property.name, "Lekki Terrace");
    assert_eq!(property.company_name, company.display_name);
    assert_eq!(property.moderation_status, ModerationStatus::Pending);
    assert_eq!(property.stage, OwnershipStage::Listing);
    assert_eq!(property.completion_status, CompletionStatus::InProgress);
    assert_eq!(property.amenities, vec!["Pool", "Gym"]);
    assert!(property.benefits.is_empty());
    assert!(!property.archived);
    assert!(!property.is_available());

    let found = repo.find_by_id(id).await?;
    assert_eq!(found.map(|p| p.price_per_share), Some(Some(5000)));

    Ok(())
}
