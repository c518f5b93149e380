use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        inspection::{InspectionDto, RespondInspectionDto, ScheduleInspectionDto},
    },
    server::{
        controller::extract::{Json, Path},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::inspection::Inspection,
        service::inspection::InspectionService,
        state::AppState,
    },
};

/// Tag for grouping site visit endpoints in OpenAPI documentation
pub static INSPECTION_TAG: &str = "inspections";

fn into_dtos(inspections: Vec<Inspection>) -> Vec<InspectionDto> {
    inspections.into_iter().map(Inspection::into_dto).collect()
}

/// Book a site visit of an approved property.
///
/// The listing agent is notified.
///
/// # Access Control
/// - `Customer`
///
/// # Returns
/// - `201 Created` - The pending inspection
/// - `400 Bad Request` - Invalid or past date, or the property is not approved
/// - `404 Not Found` - No property with that id
#[utoipa::path(
    post,
    path = "/api/inspections",
    tag = INSPECTION_TAG,
    security(("bearer_auth" = [])),
    request_body = ScheduleInspectionDto,
    responses(
        (status = 201, description = "Inspection scheduled", body = InspectionDto),
        (status = 400, description = "Invalid inspection request", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn schedule_inspection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ScheduleInspectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let inspection = InspectionService::new(&state.db)
        .schedule_inspection(&user, payload.property, &payload.inspection_date)
        .await?;

    Ok((StatusCode::CREATED, Json(inspection.into_dto())))
}

/// List visits booked on the caller's properties, latest date first.
///
/// # Access Control
/// - `Agent`
#[utoipa::path(
    get,
    path = "/api/inspections/agent",
    tag = INSPECTION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inspections", body = Vec<InspectionDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an agent", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn agent_inspections(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let inspections = InspectionService::new(&state.db)
        .agent_inspections(user.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(inspections))))
}

/// List the caller's booked visits, latest date first.
///
/// # Access Control
/// - `Customer`
#[utoipa::path(
    get,
    path = "/api/inspections/client",
    tag = INSPECTION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inspections", body = Vec<InspectionDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn client_inspections(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let inspections = InspectionService::new(&state.db)
        .client_inspections(user.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(inspections))))
}

/// Accept or reject a pending visit.
///
/// The client is notified.
///
/// # Access Control
/// - `Agent` - Agent of the inspected property
///
/// # Returns
/// - `200 OK` - The answered inspection
/// - `400 Bad Request` - Status other than ACCEPTED or REJECTED, or not pending
/// - `403 Forbidden` - The inspection belongs to another agent
/// - `404 Not Found` - No inspection with that id
#[utoipa::path(
    patch,
    path = "/api/inspections/{id}/respond",
    tag = INSPECTION_TAG,
    params(
        ("id" = i32, Path, description = "Inspection id")
    ),
    security(("bearer_auth" = [])),
    request_body = RespondInspectionDto,
    responses(
        (status = 200, description = "Inspection answered", body = InspectionDto),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Not the inspection's agent", body = ErrorDto),
        (status = 404, description = "Inspection not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn respond_to_inspection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<RespondInspectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let inspection = InspectionService::new(&state.db)
        .respond_to_inspection(&user, id, &payload.status)
        .await?;

    Ok((StatusCode::OK, Json(inspection.into_dto())))
}

/// Cancel a pending or accepted visit.
///
/// The agent is notified.
///
/// # Access Control
/// - `Customer` - Client who booked the visit
#[utoipa::path(
    patch,
    path = "/api/inspections/{id}/cancel",
    tag = INSPECTION_TAG,
    params(
        ("id" = i32, Path, description = "Inspection id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inspection cancelled", body = InspectionDto),
        (status = 400, description = "Inspection can no longer be cancelled", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Not the inspection's client", body = ErrorDto),
        (status = 404, description = "Inspection not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_inspection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let inspection = InspectionService::new(&state.db)
        .cancel_inspection(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(inspection.into_dto())))
}
