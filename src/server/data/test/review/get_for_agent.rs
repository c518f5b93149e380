use super::*;

/// Tests listing an agent's reviews.
///
/// Verifies reviews of other agents are left out and the newest review comes
/// first.
///
/// Expected: Ok with the agent's two reviews, newest first
#[tokio::test]
async fn returns_agent_reviews_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let agent = factory::create_agent(db).await?;
    let other_agent = factory::create_agent(db).await?;
    let reviewer = factory::create_user(db).await?;

    let repo = ReviewRepository::new(db);
    let first = repo
        .create(CreateReviewParam {
            agent_id: agent.id,
            reviewer_id: reviewer.id,
            rating: Some(4),
            review: Some("Helpful".to_string()),
        })
        .await?;
    let second = repo
        .create(CreateReviewParam {
            agent_id: agent.id,
            reviewer_id: reviewer.id,
            rating: Some(5),
            review: None,
        })
        .await?;
    repo.create(CreateReviewParam {
        agent_id: other_agent.id,
        reviewer_id: reviewer.id,
        rating: Some(1),
        review: None,
    })
    .await?;

    let reviews = repo.get_for_agent(agent.id).await?;

    let ids: Vec<i32> = reviews.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    Ok(())
}
