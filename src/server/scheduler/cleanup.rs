use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{
        auth::{AuthTokenRepository, PasswordResetRepository},
        notification::NotificationRepository,
    },
    error::AppError,
};

/// Read notifications older than this are deleted.
const READ_NOTIFICATION_RETENTION_DAYS: i64 = 90;

/// Rows removed by one cleanup run.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CleanupReport {
    pub auth_tokens: u64,
    pub password_resets: u64,
    pub notifications: u64,
}

/// Starts the hourly cleanup scheduler
///
/// Each run deletes:
/// - Expired access and refresh tokens
/// - Used or expired password reset tokens
/// - Read notifications older than 90 days
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();

    // Top of every hour
    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            match run_cleanup(&db, Utc::now()).await {
                Ok(report) => tracing::debug!("Cleanup finished: {:?}", report),
                Err(e) => tracing::error!("Error running cleanup: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Cleanup scheduler started");

    Ok(())
}

/// Deletes stale rows as of `now`.
pub async fn run_cleanup(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<CleanupReport, AppError> {
    let auth_tokens = AuthTokenRepository::new(db).delete_expired(now).await?;
    let password_resets = PasswordResetRepository::new(db).delete_stale(now).await?;
    let notifications = NotificationRepository::new(db)
        .delete_read_before(now - Duration::days(READ_NOTIFICATION_RETENTION_DAYS))
        .await?;

    if auth_tokens + password_resets + notifications > 0 {
        tracing::info!(
            "Removed {} auth tokens, {} password resets and {} notifications",
            auth_tokens,
            password_resets,
            notifications
        );
    }

    Ok(CleanupReport {
        auth_tokens,
        password_resets,
        notifications,
    })
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory, factory::notification::NotificationFactory};

    use super::*;

    /// Tests one cleanup run.
    ///
    /// Verifies that only expired tokens, spent reset tokens and old read
    /// notifications are removed.
    ///
    /// Expected: Ok with one row of each kind removed
    #[tokio::test]
    async fn removes_only_stale_rows() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;
        let now = Utc::now();

        factory::create_auth_token(db, user.id, "ACCESS", "expired", now - Duration::hours(1))
            .await?;
        factory::create_auth_token(db, user.id, "REFRESH", "live", now + Duration::days(1))
            .await?;
        factory::create_password_reset(db, user.id, "used", now + Duration::hours(1), true)
            .await?;
        factory::create_password_reset(db, user.id, "fresh", now + Duration::hours(1), false)
            .await?;

        NotificationFactory::new(db, &user)
            .status("READ")
            .created_at(now - Duration::days(120))
            .build()
            .await?;
        NotificationFactory::new(db, &user)
            .created_at(now - Duration::days(120))
            .build()
            .await?;
        NotificationFactory::new(db, &user)
            .status("READ")
            .created_at(now - Duration::days(10))
            .build()
            .await?;

        let report = run_cleanup(db, now).await?;

        assert_eq!(report.auth_tokens, 1);
        assert_eq!(report.password_resets, 1);
        assert_eq!(report.notifications, 1);
        assert!(AuthTokenRepository::new(db)
            .find("live", crate::server::model::auth::TokenKind::Refresh)
            .await?
            .is_some());
        assert!(PasswordResetRepository::new(db)
            .find(user.id, "fresh")
            .await?
            .is_some());

        let again = run_cleanup(db, now).await?;
        assert_eq!(again, CleanupReport::default());

        Ok(())
    }
}
