use super::*;

async fn headers_for(
    db: &sea_orm::DatabaseConnection,
    user: &entity::user::Model,
) -> Result<HeaderMap, AppError> {
    let token = format!("access-token-{}", user.id);
    factory::create_auth_token(db, user.id, "ACCESS", &token, Utc::now() + Duration::hours(1))
        .await?;
    Ok(bearer(&token))
}

/// Tests the agent permission.
///
/// Expected: Ok for an agent, Err(AccessDenied) for a customer
#[tokio::test]
async fn agent_permission_checks_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let agent = factory::create_agent(db).await?;
    let customer = factory::create_user(db).await?;

    let headers = headers_for(db, &agent).await?;
    let user = AuthGuard::new(db, &headers)
        .require(&[Permission::Agent])
        .await?;
    assert_eq!(user.id, agent.id);

    let headers = headers_for(db, &customer).await?;
    let result = AuthGuard::new(db, &headers)
        .require(&[Permission::Agent])
        .await;
    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, _))) => {
            assert_eq!(user_id, customer.id)
        }
        other => panic!("expected access denied, got {:?}", other.err()),
    }

    Ok(())
}

/// Tests the customer permission.
///
/// Expected: Ok for a customer, Err(AccessDenied) for an agent
#[tokio::test]
async fn customer_permission_checks_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let agent = factory::create_agent(db).await?;
    let customer = factory::create_user(db).await?;

    let headers = headers_for(db, &customer).await?;
    assert!(AuthGuard::new(db, &headers)
        .require(&[Permission::Customer])
        .await
        .is_ok());

    let headers = headers_for(db, &agent).await?;
    assert!(matches!(
        AuthGuard::new(db, &headers)
            .require(&[Permission::Customer])
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests the staff permission combined with authentication.
///
/// Verifies that every listed permission must pass.
///
/// Expected: Ok for a staff member, Err(AccessDenied) for a regular user
#[tokio::test]
async fn staff_permission_requires_flag() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let staff = factory::create_staff(db).await?;
    let customer = factory::create_user(db).await?;

    let headers = headers_for(db, &staff).await?;
    let user = AuthGuard::new(db, &headers)
        .require(&[Permission::Authenticated, Permission::Staff])
        .await?;
    assert!(user.is_staff);

    let headers = headers_for(db, &customer).await?;
    assert!(matches!(
        AuthGuard::new(db, &headers)
            .require(&[Permission::Authenticated, Permission::Staff])
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that a staff member who is a customer still fails the agent check.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn staff_is_not_an_agent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let staff = factory::create_staff(db).await?;

    let headers = headers_for(db, &staff).await?;
    assert!(matches!(
        AuthGuard::new(db, &headers)
            .require(&[Permission::Staff, Permission::Agent])
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
