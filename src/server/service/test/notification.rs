use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory, factory::notification::NotificationFactory};

use crate::server::{
    error::AppError, model::notification::NotificationStatus,
    service::notification::NotificationService, util::pagination::PageRequest,
};

/// Tests listing notifications.
///
/// Expected: Ok with the user's notifications only, newest first
#[tokio::test]
async fn list_returns_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let old = NotificationFactory::new(db, &user)
        .message("old")
        .created_at(Utc::now() - Duration::hours(3))
        .build()
        .await?;
    let new = NotificationFactory::new(db, &user).message("new").build().await?;
    NotificationFactory::new(db, &other).build().await?;

    let page = NotificationService::new(db)
        .list(user.id, PageRequest::new(None)?)
        .await?;

    assert_eq!(page.total, 2);
    let ids: Vec<i32> = page.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![new.id, old.id]);

    Ok(())
}

/// Tests marking notifications read.
///
/// Verifies that a user cannot mark someone else's notification and that marking
/// everything only counts unread rows.
///
/// Expected: Err(NotFound) for the foreign notification, unread count 0 afterwards
#[tokio::test]
async fn mark_read_updates_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let first = NotificationFactory::new(db, &user).build().await?;
    NotificationFactory::new(db, &user).build().await?;
    NotificationFactory::new(db, &user).status("READ").build().await?;
    let foreign = NotificationFactory::new(db, &other).build().await?;

    let service = NotificationService::new(db);
    assert_eq!(service.unread_count(user.id).await?, 2);

    let read = service.mark_read(user.id, first.id).await?;
    assert_eq!(read.status, NotificationStatus::Read);
    assert_eq!(service.unread_count(user.id).await?, 1);

    assert!(matches!(
        service.mark_read(user.id, foreign.id).await,
        Err(AppError::NotFound(msg)) if msg == "Notification not found"
    ));

    assert_eq!(service.mark_all_read(user.id).await?, 1);
    assert_eq!(service.unread_count(user.id).await?, 0);
    assert_eq!(service.unread_count(other.id).await?, 1);

    Ok(())
}
