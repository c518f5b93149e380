use super::*;

/// Tests that a user's own phone number does not count as taken.
///
/// Expected: Ok(false) for the owner, Ok(true) for anyone else
#[tokio::test]
async fn ignores_own_number() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::UserFactory::new(db)
        .phone(Some("08012345678".to_string()))
        .build()
        .await?;
    let other = factory::create_user(db).await?;

    let repo = UserRepository::new(db);

    assert!(!repo.phone_taken_by_other("08012345678", owner.id).await?);
    assert!(repo.phone_taken_by_other("08012345678", other.id).await?);
    assert!(!repo.phone_taken_by_other("09000000000", other.id).await?);

    Ok(())
}
