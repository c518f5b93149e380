use super::*;

/// Tests a partial profile update.
///
/// Verifies that supplied fields are written, omitted fields keep their value
/// and the profile stage is marked complete.
///
/// Expected: Ok with updated names, unchanged city and profile stage set
#[tokio::test]
async fn updates_supplied_fields_and_profile_stage() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParam {
                firstname: Some("Chidi".to_string()),
                phone: Some("08011112222".to_string()),
                ..Default::default()
            },
            None,
        )
        .await?;

    assert_eq!(updated.firstname, "Chidi");
    assert_eq!(updated.phone.as_deref(), Some("08011112222"));
    assert_eq!(updated.city.as_deref(), Some("Lagos"));
    assert!(updated.profile_stages.profile);
    assert!(!updated.kyc_stages.profile);

    Ok(())
}

/// Tests attaching a newly created identity document album.
///
/// Expected: Ok with the album id stored on the user
#[tokio::test]
async fn attaches_identity_album() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let album = factory::create_album(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(user.id, UpdateProfileParam::default(), Some(album.id))
        .await?;

    assert_eq!(updated.identity_document_album_id, Some(album.id));

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .update_profile(999, UpdateProfileParam::default(), None)
        .await;

    assert!(result.is_err());

    Ok(())
}
