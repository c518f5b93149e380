use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
};

mod require;

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

/// Tests reading the bearer token from the request headers.
///
/// Verifies that a missing header, another scheme and an empty token are all
/// treated as missing credentials.
///
/// Expected: Ok for `Bearer abc`, Err(MissingCredentials) otherwise
#[tokio::test]
async fn extracts_bearer_token() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = bearer("abc");
    assert_eq!(AuthGuard::new(db, &headers).token()?, "abc");

    let empty = HeaderMap::new();
    assert!(matches!(
        AuthGuard::new(db, &empty).token(),
        Err(AuthError::MissingCredentials)
    ));

    let mut basic = HeaderMap::new();
    basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
    assert!(matches!(
        AuthGuard::new(db, &basic).token(),
        Err(AuthError::MissingCredentials)
    ));

    let mut blank = HeaderMap::new();
    blank.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
    assert!(matches!(
        AuthGuard::new(db, &blank).token(),
        Err(AuthError::MissingCredentials)
    ));

    Ok(())
}

/// Tests authenticating with a valid access token.
///
/// Expected: Ok(User) for the token's owner
#[tokio::test]
async fn authenticates_valid_access_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_auth_token(
        db,
        user.id,
        "ACCESS",
        "valid-access-token",
        Utc::now() + Duration::hours(1),
    )
    .await?;

    let headers = bearer("valid-access-token");
    let authenticated = AuthGuard::new(db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    assert_eq!(authenticated.id, user.id);
    assert_eq!(authenticated.email, user.email);

    Ok(())
}

/// Tests a request without credentials.
///
/// Expected: Err(AuthError::MissingCredentials)
#[tokio::test]
async fn rejects_missing_header() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &headers)
        .require(&[Permission::Authenticated])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingCredentials))
    ));

    Ok(())
}

/// Tests tokens that must not authenticate.
///
/// Verifies that unknown tokens, expired access tokens and refresh tokens are all
/// refused the same way.
///
/// Expected: Err(AuthError::InvalidToken) for each
#[tokio::test]
async fn rejects_unknown_expired_and_refresh_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_auth_token(
        db,
        user.id,
        "ACCESS",
        "expired-access-token",
        Utc::now() - Duration::minutes(1),
    )
    .await?;
    factory::create_auth_token(
        db,
        user.id,
        "REFRESH",
        "refresh-token",
        Utc::now() + Duration::days(1),
    )
    .await?;

    for token in ["no-such-token", "expired-access-token", "refresh-token"] {
        let headers = bearer(token);
        let result = AuthGuard::new(db, &headers)
            .require(&[Permission::Authenticated])
            .await;
        assert!(
            matches!(result, Err(AppError::AuthErr(AuthError::InvalidToken))),
            "token {} should be invalid",
            token
        );
    }

    Ok(())
}

/// Tests a valid token belonging to a disabled account.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_inactive_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .active(false)
        .build()
        .await?;
    factory::create_auth_token(
        db,
        user.id,
        "ACCESS",
        "inactive-user-token",
        Utc::now() + Duration::hours(1),
    )
    .await?;

    let headers = bearer("inactive-user-token");
    let result = AuthGuard::new(db, &headers)
        .require(&[Permission::Authenticated])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}
