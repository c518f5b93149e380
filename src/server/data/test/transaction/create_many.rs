use super::*;

/// Tests writing the logs of a settled cart.
///
/// Verifies logs come back in input order with their status and failure message.
///
/// Expected: Ok with a SUCCESS log followed by a FAILED log
#[tokio::test]
async fn writes_logs_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;

    let param = |reference: &str, status: TransactionStatus, error_message: Option<&str>| {
        CreateTransactionLogParam {
            property_name: property.name.clone(),
            reference: reference.to_string(),
            property_id: property.id,
            agent_id: agent.id,
            client_id: customer.id,
            amount: 2000,
            number_of_shares: 2,
            status,
            payment_method: PaymentMethod::Paystack,
            error_message: error_message.map(str::to_string),
        }
    };

    let repo = TransactionLogRepository::new(db);
    let logs = repo
        .create_many(vec![
            param("rfb_aaa", TransactionStatus::Success, None),
            param("rfb_bbb", TransactionStatus::Failed, Some("Card declined")),
        ])
        .await?;

    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].reference, "rfb_aaa");
    assert_eq!(logs[0].status, TransactionStatus::Success);
    assert_eq!(logs[1].status, TransactionStatus::Failed);
    assert_eq!(logs[1].error_message.as_deref(), Some("Card declined"));

    Ok(())
}

/// Tests writing no logs.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn empty_input_writes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TransactionLogRepository::new(db);
    let logs = repo.create_many(Vec::new()).await?;

    assert!(logs.is_empty());

    Ok(())
}
