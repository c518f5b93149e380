use super::*;

/// Tests listing agents.
///
/// Verifies that customers are left out of the agent listing and the total
/// counts only agents.
///
/// Expected: Ok with the two agents and total of 2
#[tokio::test]
async fn returns_only_agents() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_agent(db).await?;
    factory::create_user(db).await?;
    let second = factory::create_agent(db).await?;

    let repo = UserRepository::new(db);
    let (agents, total) = repo.get_agents_paginated(PageRequest::new(None)?).await?;

    assert_eq!(total, 2);
    let ids: Vec<i32> = agents.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}

/// Tests requesting a page past the end.
///
/// Expected: Ok with empty page and the full total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_agent(db).await?;

    let repo = UserRepository::new(db);
    let (agents, total) = repo.get_agents_paginated(PageRequest::new(Some(3))?).await?;

    assert!(agents.is_empty());
    assert_eq!(total, 1);

    Ok(())
}
