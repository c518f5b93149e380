use super::*;

/// Tests replacing the bank information list.
///
/// Expected: Ok with the stored list equal to the new one
#[tokio::test]
async fn replaces_bank_information() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let accounts = vec![BankInformation {
        account_name: "Acme Homes Ltd".to_string(),
        account_number: "0123456789".to_string(),
        bank_name: "First Bank".to_string(),
        country: "Nigeria".to_string(),
    }];

    let repo = CompanyRepository::new(db);
    let updated = repo.set_bank_information(company.id, &accounts).await?;

    assert_eq!(updated.bank_information, accounts);

    let reloaded = repo.find_by_user(agent.id).await?.unwrap();
    assert_eq!(reloaded.bank_information, accounts);

    Ok(())
}

/// Tests updating a company that does not exist.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_missing_company() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CompanyRepository::new(db);

    assert!(repo.set_bank_information(404, &[]).await.is_err());

    Ok(())
}
