use super::*;

fn signup(email: &str) -> CreateUserParam {
    CreateUserParam {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        firstname: "Ada".to_string(),
        lastname: "Obi".to_string(),
        role: Role::Customer,
    }
}

/// Tests creating a new user.
///
/// Verifies that a signed up user starts unverified and with every onboarding
/// stage unset.
///
/// Expected: Ok with unverified user and empty stage maps
#[tokio::test]
async fn creates_unverified_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(signup("ada@example.com")).await?;

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Customer);
    assert!(!user.is_verified);
    assert!(!user.profile_stages.profile);
    assert!(!user.kyc_stages.billing);

    let found = repo.find_by_email("ada@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests inserting a duplicate email.
///
/// Verifies that the unique email column rejects a second account.
///
/// Expected: Err
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(signup("dup@example.com")).await?;

    assert!(repo.email_exists("dup@example.com").await?);
    assert!(repo.create(signup("dup@example.com")).await.is_err());

    Ok(())
}
