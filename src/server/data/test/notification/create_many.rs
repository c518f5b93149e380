use super::*;

/// Tests fanning out notifications.
///
/// Verifies that every recipient gets an unread notification.
///
/// Expected: Ok with one unread notification per user
#[tokio::test]
async fn creates_unread_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_user(db).await?;
    let agent = factory::create_agent(db).await?;

    let repo = NotificationRepository::new(db);
    repo.create_many(vec![
        NewNotification::new(customer.id, Role::Customer, "Payment received"),
        NewNotification::new(agent.id, Role::Agent, "You sold 2 shares"),
    ])
    .await?;

    assert_eq!(repo.count_unread(customer.id).await?, 1);
    assert_eq!(repo.count_unread(agent.id).await?, 1);

    let (page, total) = repo
        .get_for_user_paginated(agent.id, PageRequest::new(None)?)
        .await?;
    assert_eq!(total, 1);
    assert_eq!(page[0].message.as_deref(), Some("You sold 2 shares"));
    assert_eq!(page[0].user_role, Role::Agent);
    assert_eq!(page[0].status, NotificationStatus::Unread);

    Ok(())
}

/// Tests the paginated listing order.
///
/// Expected: Ok with the newest notification first
#[tokio::test]
async fn lists_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let older = factory::notification::NotificationFactory::new(db, &user)
        .created_at(now - Duration::hours(2))
        .build()
        .await?;
    let newer = factory::notification::NotificationFactory::new(db, &user)
        .created_at(now)
        .build()
        .await?;

    let repo = NotificationRepository::new(db);
    let (page, _) = repo
        .get_for_user_paginated(user.id, PageRequest::new(None)?)
        .await?;

    let ids: Vec<i32> = page.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}
