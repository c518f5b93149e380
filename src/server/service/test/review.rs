use test_utils::{builder::TestBuilder, factory};

use super::domain_user;
use crate::server::{error::AppError, service::review::ReviewService};

/// Tests reviewing an agent.
///
/// Verifies that a blank review text is dropped while the rating is kept.
///
/// Expected: Ok with rating 5 and no text
#[tokio::test]
async fn create_review_stores_rating() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let agent = factory::create_agent(db).await?;
    let reviewer = domain_user(factory::create_user(db).await?)?;

    let review = ReviewService::new(db)
        .create_review(&reviewer, agent.id, Some(5), Some("   ".to_string()))
        .await?;

    assert_eq!(review.agent_id, agent.id);
    assert_eq!(review.reviewer_id, reviewer.id);
    assert_eq!(review.rating, Some(5));
    assert!(review.review.is_none());

    Ok(())
}

/// Tests review input rules.
///
/// Expected: Err(ValidationErr) on `error` without content and on `rating` when out
/// of range
#[tokio::test]
async fn create_review_validates_input() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let agent = factory::create_agent(db).await?;
    let reviewer = domain_user(factory::create_user(db).await?)?;
    let service = ReviewService::new(db);

    match service.create_review(&reviewer, agent.id, None, None).await {
        Err(AppError::ValidationErr(e)) => {
            assert_eq!(e.field, "error");
            assert_eq!(e.message, "must provide 'review' or 'rating'.");
        }
        other => panic!("expected validation error, got {:?}", other.err()),
    }

    for rating in [0, 6] {
        assert!(matches!(
            service
                .create_review(&reviewer, agent.id, Some(rating), None)
                .await,
            Err(AppError::ValidationErr(e)) if e.field == "rating"
        ));
    }

    Ok(())
}

/// Tests reviewing someone who is not an agent, and reviewing oneself.
///
/// Expected: Err(NotFound) "Agent not found", then Err(BadRequest)
#[tokio::test]
async fn create_review_rejects_bad_targets() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let customer = factory::create_user(db).await?;
    let agent = domain_user(factory::create_agent(db).await?)?;
    let service = ReviewService::new(db);

    let result = service
        .create_review(&agent, customer.id, Some(4), None)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Agent not found"));

    let result = service.create_review(&agent, agent.id, Some(4), None).await;
    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg == "you cannot review yourself"
    ));

    Ok(())
}
