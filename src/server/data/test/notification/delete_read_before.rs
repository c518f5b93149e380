use super::*;

/// Tests pruning old read notifications.
///
/// Verifies that unread and recent read notifications survive.
///
/// Expected: Ok(1) with two notifications left
#[tokio::test]
async fn deletes_only_old_read_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let month_ago = now - Duration::days(31);

    factory::notification::NotificationFactory::new(db, &user)
        .status("READ")
        .created_at(month_ago)
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, &user)
        .created_at(month_ago)
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, &user)
        .status("READ")
        .created_at(now)
        .build()
        .await?;

    let repo = NotificationRepository::new(db);
    let removed = repo.delete_read_before(now - Duration::days(30)).await?;

    assert_eq!(removed, 1);
    let (_, total) = repo
        .get_for_user_paginated(user.id, PageRequest::new(None)?)
        .await?;
    assert_eq!(total, 2);

    Ok(())
}
