use super::*;

/// Tests reading one's own notification.
///
/// Expected: Ok(Some) with READ status and the unread count down by one
#[tokio::test]
async fn marks_own_notification_read() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let notification = factory::create_notification(db, &user).await?;
    factory::create_notification(db, &user).await?;

    let repo = NotificationRepository::new(db);
    let read = repo.mark_read(user.id, notification.id).await?;

    assert_eq!(read.map(|n| n.status), Some(NotificationStatus::Read));
    assert_eq!(repo.count_unread(user.id).await?, 1);

    Ok(())
}

/// Tests reading another user's notification.
///
/// Expected: Ok(None) and the notification stays unread
#[tokio::test]
async fn ignores_foreign_notification() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let intruder = factory::create_user(db).await?;
    let notification = factory::create_notification(db, &owner).await?;

    let repo = NotificationRepository::new(db);

    assert!(repo.mark_read(intruder.id, notification.id).await?.is_none());
    assert_eq!(repo.count_unread(owner.id).await?, 1);

    Ok(())
}

/// Tests marking everything read.
///
/// Expected: Ok(2) and no unread notifications left
#[tokio::test]
async fn marks_all_read() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_notification(db, &user).await?;
    factory::create_notification(db, &user).await?;
    factory::notification::NotificationFactory::new(db, &user)
        .status("READ")
        .build()
        .await?;

    let repo = NotificationRepository::new(db);
    let updated = repo.mark_all_read(user.id).await?;

    assert_eq!(updated, 2);
    assert_eq!(repo.count_unread(user.id).await?, 0);

    Ok(())
}
