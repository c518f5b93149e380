use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder, factory, factory::inspection::InspectionFactory,
    factory::property::PropertyFactory,
};

use super::domain_user;
use crate::server::{
    error::AppError,
    model::inspection::InspectionStatus,
    service::{inspection::InspectionService, notification::NotificationService},
    util::pagination::PageRequest,
};

fn in_days(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

/// Tests booking a site visit.
///
/// Verifies that contact details of both parties are copied onto the inspection and
/// the agent receives a notification naming the property.
///
/// Expected: Ok with a pending inspection and one notification for the agent
#[tokio::test]
async fn schedule_inspection_notifies_agent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let agent = factory::user::UserFactory::new(db)
        .role("AGENT")
        .phone(Some("08055556666".to_string()))
        .build()
        .await?;
    let company = factory::create_company(db, agent.id).await?;
    let property = PropertyFactory::new(db, &agent, &company)
        .moderation_status("APPROVED")
        .build()
        .await?;
    let client = domain_user(factory::create_user(db).await?)?;

    let inspection = InspectionService::new(db)
        .schedule_inspection(&client, property.id, &in_days(3))
        .await?;

    assert_eq!(inspection.status, InspectionStatus::Pending);
    assert_eq!(inspection.agent_id, agent.id);
    assert_eq!(inspection.agent_phone.as_deref(), Some("08055556666"));
    assert_eq!(inspection.client_id, client.id);
    assert_eq!(
        inspection.company_name.as_deref(),
        Some(company.display_name.as_str())
    );

    let page = NotificationService::new(db)
        .list(agent.id, PageRequest::new(None)?)
        .await?;
    assert_eq!(page.total, 1);
    let message = page.items[0].message.clone().unwrap_or_default();
    assert!(message.starts_with(&format!(
        "New inspection request for property {} on",
        property.name
    )));

    Ok(())
}

/// Tests booking rules.
///
/// Verifies that unparseable and past dates are refused before the property is
/// looked up, and that unapproved listings cannot be visited.
///
/// Expected: Err(ValidationErr) twice, then Err(BadRequest)
#[tokio::test]
async fn schedule_inspection_validates_request() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, company) = factory::helpers::create_agent_with_company(db).await?;
    let pending = PropertyFactory::new(db, &agent, &company).build().await?;
    let client = domain_user(factory::create_user(db).await?)?;
    let service = InspectionService::new(db);

    match service
        .schedule_inspection(&client, pending.id, "next tuesday")
        .await
    {
        Err(AppError::ValidationErr(e)) => {
            assert_eq!(e.message, "inspection_date must contain valid datetime string")
        }
        other => panic!("expected validation error, got {:?}", other.err()),
    }

    match service
        .schedule_inspection(&client, pending.id, &in_days(-1))
        .await
    {
        Err(AppError::ValidationErr(e)) => {
            assert_eq!(e.message, "inspection_date must be a future date")
        }
        other => panic!("expected validation error, got {:?}", other.err()),
    }

    let result = service
        .schedule_inspection(&client, pending.id, &in_days(2))
        .await;
    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg == "property is not available for inspection"
    ));

    Ok(())
}

/// Tests an agent answering a visit request.
///
/// Verifies that only ACCEPTED or REJECTED are allowed, that the client is notified,
/// and that an answered inspection cannot be answered again.
///
/// Expected: Ok with ACCEPTED, then Err(BadRequest)
#[tokio::test]
async fn respond_to_inspection_updates_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let client = factory::create_user(db).await?;
    let inspection = InspectionFactory::new(db, &property, client.id).build().await?;
    let agent = domain_user(agent)?;
    let service = InspectionService::new(db);

    assert!(matches!(
        service
            .respond_to_inspection(&agent, inspection.id, "CANCELLED")
            .await,
        Err(AppError::ValidationErr(e)) if e.field == "status"
    ));

    let updated = service
        .respond_to_inspection(&agent, inspection.id, "ACCEPTED")
        .await?;
    assert_eq!(updated.status, InspectionStatus::Accepted);
    assert_eq!(
        NotificationService::new(db).unread_count(client.id).await?,
        1
    );

    let result = service
        .respond_to_inspection(&agent, inspection.id, "REJECTED")
        .await;
    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg == "inspection is no longer pending"
    ));

    Ok(())
}

/// Tests that only the inspection's agent may answer it.
///
/// Expected: Err(Forbidden) for another agent, Err(NotFound) for an unknown id
#[tokio::test]
async fn respond_to_inspection_is_agent_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let client = factory::create_user(db).await?;
    let inspection = InspectionFactory::new(db, &property, client.id).build().await?;
    let other = domain_user(factory::create_agent(db).await?)?;
    let service = InspectionService::new(db);

    assert!(matches!(
        service
            .respond_to_inspection(&other, inspection.id, "ACCEPTED")
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service
            .respond_to_inspection(&other, inspection.id + 100, "ACCEPTED")
            .await,
        Err(AppError::NotFound(msg)) if msg == "Inspection not found"
    ));

    Ok(())
}

/// Tests a client cancelling visits.
///
/// Verifies that accepted visits can still be cancelled while rejected ones cannot,
/// and that the agent is told about the cancellation.
///
/// Expected: Ok with CANCELLED, then Err(BadRequest) for the rejected visit
#[tokio::test]
async fn cancel_inspection_by_client() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let client = factory::create_user(db).await?;
    let accepted = InspectionFactory::new(db, &property, client.id)
        .status("ACCEPTED")
        .build()
        .await?;
    let rejected = InspectionFactory::new(db, &property, client.id)
        .status("REJECTED")
        .build()
        .await?;
    let stranger = domain_user(factory::create_user(db).await?)?;
    let client = domain_user(client)?;
    let service = InspectionService::new(db);

    assert!(matches!(
        service.cancel_inspection(&stranger, accepted.id).await,
        Err(AppError::Forbidden(_))
    ));

    let cancelled = service.cancel_inspection(&client, accepted.id).await?;
    assert_eq!(cancelled.status, InspectionStatus::Cancelled);
    assert_eq!(NotificationService::new(db).unread_count(agent.id).await?, 1);

    let result = service.cancel_inspection(&client, rejected.id).await;
    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg == "inspection can no longer be cancelled"
    ));

    Ok(())
}

/// Tests listing inspections for each side.
///
/// Expected: Ok with the latest visit first for the agent, and the client's own
/// visits only
#[tokio::test]
async fn inspections_are_listed_per_party() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (agent, _company, property) = factory::helpers::create_marketplace_property(db).await?;
    let client = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let soon = InspectionFactory::new(db, &property, client.id)
        .inspection_date(Utc::now() + Duration::days(1))
        .build()
        .await?;
    let later = InspectionFactory::new(db, &property, other.id)
        .inspection_date(Utc::now() + Duration::days(5))
        .build()
        .await?;

    let service = InspectionService::new(db);

    let ids: Vec<i32> = service
        .agent_inspections(agent.id)
        .await?
        .iter()
        .map(|inspection| inspection.id)
        .collect();
    assert_eq!(ids, vec![later.id, soon.id]);

    let mine = service.client_inspections(client.id).await?;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, soon.id);

    Ok(())
}
