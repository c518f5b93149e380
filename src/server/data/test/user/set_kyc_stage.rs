use super::*;

/// Tests approving a KYC stage.
///
/// Verifies that the decision lands on both the KYC and the profile map.
///
/// Expected: Ok with the business stage set on both maps
#[tokio::test]
async fn approval_sets_both_maps() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let agent = factory::create_agent(db).await?;

    let repo = UserRepository::new(db);
    let user = repo
        .set_kyc_stage(agent.id, OnboardingStage::Business, true)
        .await?;

    assert!(user.kyc_stages.business);
    assert!(user.profile_stages.business);
    assert!(!user.kyc_stages.profile);

    Ok(())
}

/// Tests rejecting a previously approved stage.
///
/// Expected: Ok with the stage cleared on both maps
#[tokio::test]
async fn rejection_clears_both_maps() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let agent = factory::create_agent(db).await?;

    let repo = UserRepository::new(db);
    repo.set_kyc_stage(agent.id, OnboardingStage::Billing, true)
        .await?;
    let user = repo
        .set_kyc_stage(agent.id, OnboardingStage::Billing, false)
        .await?;

    assert!(!user.kyc_stages.billing);
    assert!(!user.profile_stages.billing);

    Ok(())
}
