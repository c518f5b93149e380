use super::*;

/// Tests re-sending a verification code.
///
/// Verifies that the existing row is reused with the new code instead of a
/// second row being inserted.
///
/// Expected: Ok with the latest code and expiry
#[tokio::test]
async fn upsert_replaces_existing_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_email_verification(db, user.id, "111111", Utc::now()).await?;

    let repo = EmailVerificationRepository::new(db);
    let expiry = Utc::now() + Duration::minutes(10);
    repo.upsert(user.id, "222222".to_string(), expiry).await?;

    let verification = repo.find_by_user(user.id).await?.unwrap();
    assert_eq!(verification.token, "222222");
    assert!((verification.token_expiry - expiry).num_milliseconds().abs() <= 1);
    assert!(!verification.is_verified);

    Ok(())
}

/// Tests consuming a verification code.
///
/// Expected: Ok with is_verified set and expiry moved to `now`
#[tokio::test]
async fn mark_verified_expires_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_email_verification(db, user.id, "333333", Utc::now() + Duration::hours(1))
        .await?;

    let repo = EmailVerificationRepository::new(db);
    let now = Utc::now();
    repo.mark_verified(user.id, now).await?;

    let verification = repo.find_by_user(user.id).await?.unwrap();
    assert!(verification.is_verified);
    assert!((verification.token_expiry - now).num_milliseconds().abs() <= 1);

    Ok(())
}
