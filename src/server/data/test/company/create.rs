use super::*;

fn company_for(user_id: i32) -> CreateCompanyParam {
    CreateCompanyParam {
        user_id,
        email: "sales@acme.ng".to_string(),
        phone: "08030000000".to_string(),
        display_name: "Acme Homes".to_string(),
        website: None,
        city: "Abuja".to_string(),
        country: "Nigeria".to_string(),
        description: None,
        reference_number: "REF-1".to_string(),
        company_logo: None,
        certificate_of_incorporation: None,
    }
}

/// Tests creating an agent's company.
///
/// Verifies the company is found by its owner and starts without bank details.
///
/// Expected: Ok with empty bank information
#[tokio::test]
async fn creates_company_for_agent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let agent = factory::create_agent(db).await?;

    let repo = CompanyRepository::new(db);
    let company = repo.create(company_for(agent.id)).await?;

    assert_eq!(company.display_name, "Acme Homes");
    assert!(company.bank_information.is_empty());

    let found = repo.find_by_user(agent.id).await?;
    assert_eq!(found.map(|c| c.id), Some(company.id));
    assert!(repo.email_taken("sales@acme.ng").await?);
    assert!(repo.phone_taken("08030000000").await?);
    assert!(!repo.phone_taken("08039999999").await?);

    Ok(())
}

/// Tests that an agent cannot own two companies.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_second_company_for_same_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, _) = factory::helpers::create_agent_with_company(db).await?;

    let repo = CompanyRepository::new(db);
    let mut param = company_for(agent.id);
    param.email = "other@acme.ng".to_string();
    param.phone = "08031111111".to_string();

    assert!(repo.create(param).await.is_err());

    Ok(())
}
