//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Onboarding stage map with every stage unset.
pub fn empty_stages() -> serde_json::Value {
    serde_json::json!({ "profile": false, "business": false, "billing": false })
}

/// Creates an agent together with their company.
///
/// # Returns
/// - `Ok((agent, company))` - The created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_agent_with_company(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::company::Model), DbErr> {
    let agent = crate::factory::user::create_agent(db).await?;
    let company = crate::factory::company::create_company(db, agent.id).await?;

    Ok((agent, company))
}

/// Creates an agent, their company and an approved property priced at 1000 per share.
///
/// This is the minimum a customer needs to buy shares or book a visit.
///
/// # Returns
/// - `Ok((agent, company, property))` - The created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_marketplace_property(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::company::Model,
        entity::property::Model,
    ),
    DbErr,
> {
    let (agent, company) = create_agent_with_company(db).await?;
    let property = crate::factory::property::PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .price_per_share(Some(1000))
        .total_number_of_shares(Some(100))
        .build()
        .await?;

    Ok((agent, company, property))
}
