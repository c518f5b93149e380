use super::*;

/// Tests that a reset token only matches its own user.
///
/// Expected: Ok(Some) for the owner, Ok(None) for another user
#[tokio::test]
async fn find_requires_matching_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = PasswordResetRepository::new(db);
    repo.create(user.id, "reset-token".to_string(), Utc::now() + Duration::hours(1))
        .await?;

    assert!(repo.find(user.id, "reset-token").await?.is_some());
    assert!(repo.find(other.id, "reset-token").await?.is_none());

    Ok(())
}

/// Tests purging used and expired reset tokens.
///
/// Expected: Ok(2) with only the live unused token left
#[tokio::test]
async fn delete_stale_removes_used_and_expired() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let later = now + Duration::hours(1);
    factory::create_password_reset(db, user.id, "used", later, true).await?;
    factory::create_password_reset(db, user.id, "expired", now - Duration::hours(1), false)
        .await?;
    factory::create_password_reset(db, user.id, "live", later, false).await?;

    let repo = PasswordResetRepository::new(db);
    let removed = repo.delete_stale(now).await?;

    assert_eq!(removed, 2);
    assert!(repo.find(user.id, "live").await?.is_some());
    assert!(repo.find(user.id, "used").await?.is_none());

    Ok(())
}

/// Tests marking a reset token used.
///
/// Expected: Ok with `used` set on the row
#[tokio::test]
async fn mark_used_sets_flag() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let reset =
        factory::create_password_reset(db, user.id, "once", Utc::now() + Duration::hours(1), false)
            .await?;

    let repo = PasswordResetRepository::new(db);
    repo.mark_used(reset.id).await?;

    let reset = repo.find(user.id, "once").await?.unwrap();
    assert!(reset.used);

    Ok(())
}
