use super::*;

/// Tests the company verification flag of a user.
///
/// Expected: Ok(false) before any check, Ok(true) after a passed check
#[tokio::test]
async fn reports_verified_after_passed_check() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let agent = factory::create_agent(db).await?;

    let repo = CompanyVerificationRepository::new(db);
    assert!(!repo.is_verified(agent.id).await?);

    repo.create(CreateCompanyVerificationParam {
        user_id: agent.id,
        registration_number: "RC123456".to_string(),
        reference_number: "REF-9".to_string(),
        registered_company_name: "ACME HOMES LIMITED".to_string(),
        is_verified: true,
    })
    .await?;

    assert!(repo.is_verified(agent.id).await?);

    Ok(())
}

/// Tests detecting a registration already used by another company.
///
/// Verifies that matching any one of the unique columns is enough.
///
/// Expected: Ok(true) on a shared reference number, Ok(false) otherwise
#[tokio::test]
async fn exists_matches_any_unique_column() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let agent = factory::create_agent(db).await?;

    let repo = CompanyVerificationRepository::new(db);
    repo.create(CreateCompanyVerificationParam {
        user_id: agent.id,
        registration_number: "RC1".to_string(),
        reference_number: "REF-1".to_string(),
        registered_company_name: "ONE LTD".to_string(),
        is_verified: false,
    })
    .await?;

    assert!(repo.exists("RC2", "REF-1", "TWO LTD").await?);
    assert!(!repo.exists("RC2", "REF-2", "TWO LTD").await?);

    Ok(())
}
