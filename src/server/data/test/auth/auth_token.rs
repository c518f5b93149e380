use super::*;

/// Tests that a token is only found under the kind it was issued as.
///
/// Expected: Ok(Some) for ACCESS, Ok(None) for REFRESH
#[tokio::test]
async fn finds_token_by_kind() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = AuthTokenRepository::new(db);
    repo.create(IssueTokenParam {
        user_id: user.id,
        kind: TokenKind::Access,
        token: "access-token".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    })
    .await?;

    let access = repo.find("access-token", TokenKind::Access).await?;
    assert_eq!(access.map(|t| t.user_id), Some(user.id));
    assert!(repo
        .find("access-token", TokenKind::Refresh)
        .await?
        .is_none());

    Ok(())
}

/// Tests revoking every token of a user.
///
/// Expected: Ok(2) rows removed, other users' tokens kept
#[tokio::test]
async fn deletes_all_tokens_of_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let expiry = Utc::now() + Duration::hours(1);
    factory::create_auth_token(db, user.id, "ACCESS", "a1", expiry).await?;
    factory::create_auth_token(db, user.id, "REFRESH", "r1", expiry).await?;
    factory::create_auth_token(db, other.id, "ACCESS", "a2", expiry).await?;

    let repo = AuthTokenRepository::new(db);
    let removed = repo.delete_for_user(user.id).await?;

    assert_eq!(removed, 2);
    assert!(repo.find("a2", TokenKind::Access).await?.is_some());

    Ok(())
}

/// Tests purging expired tokens.
///
/// Expected: Ok(1) with the live token kept
#[tokio::test]
async fn deletes_only_expired_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    factory::create_auth_token(db, user.id, "ACCESS", "old", now - Duration::minutes(1)).await?;
    factory::create_auth_token(db, user.id, "ACCESS", "live", now + Duration::hours(1)).await?;

    let repo = AuthTokenRepository::new(db);
    let removed = repo.delete_expired(now).await?;

    assert_eq!(removed, 1);
    assert!(repo.find("old", TokenKind::Access).await?.is_none());
    assert!(repo.find("live", TokenKind::Access).await?.is_some());

    Ok(())
}
