use super::*;

/// Tests the agent's sales history.
///
/// Expected: Ok with the agent's logs newest first
#[tokio::test]
async fn returns_agent_logs_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (agent, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let (_, _, other_property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;
    let now = Utc::now();

    let older =
        factory::create_transaction_log(db, &property, customer.id, "SUCCESS", now - Duration::days(1))
            .await?;
    let newer = factory::create_transaction_log(db, &property, customer.id, "FAILED", now).await?;
    factory::create_transaction_log(db, &other_property, customer.id, "SUCCESS", now).await?;

    let repo = TransactionLogRepository::new(db);
    let logs = repo.get_for_agent(agent.id).await?;

    let ids: Vec<i32> = logs.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests the client's purchase history.
///
/// Expected: Ok with only the client's logs
#[tokio::test]
async fn returns_client_logs_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, property) = factory::helpers::create_marketplace_property(db).await?;
    let customer = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();

    let own = factory::create_transaction_log(db, &property, customer.id, "SUCCESS", now).await?;
    factory::create_transaction_log(db, &property, other.id, "SUCCESS", now).await?;

    let repo = TransactionLogRepository::new(db);
    let logs = repo.get_for_client(customer.id).await?;

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, own.id);

    Ok(())
}
