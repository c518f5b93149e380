use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        admin::{KycVerificationDto, ModeratePropertyDto, OwnershipReviewDto},
        api::{ErrorDto, MessageDto, PageDto},
        ownership::OwnershipRequestDto,
        property::PropertyListItemDto,
    },
    server::{
        controller::{extract::{Json, Query}, param::PaginationParam},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::ownership::OwnershipRequest,
        service::admin::AdminService,
        state::AppState,
    },
};

/// Tag for grouping staff endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

const STAFF: [Permission; 2] = [Permission::Authenticated, Permission::Staff];

/// Record a KYC decision for one onboarding stage of a user.
///
/// Sets the stage in both the completion and verification maps and notifies the
/// user.
///
/// # Access Control
/// - `Staff`
///
/// # Returns
/// - `200 OK` - `{"message": status}`
/// - `400 Bad Request` - Unknown stage or status
/// - `404 Not Found` - No user with that id
#[utoipa::path(
    patch,
    path = "/api/admin/kyc-verification",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    request_body = KycVerificationDto,
    responses(
        (status = 200, description = "Decision recorded", body = MessageDto),
        (status = 400, description = "Invalid stage or status", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not staff", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn kyc_verification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<KycVerificationDto>,
) -> Result<impl IntoResponse, AppError> {
    let staff = AuthGuard::new(&state.db, &headers).require(&STAFF).await?;

    let status = AdminService::new(&state.db)
        .kyc_verification(
            payload.user_id,
            &payload.kyc_verification_stage,
            &payload.kyc_verification_status,
        )
        .await?;
    tracing::info!(
        "Staff {} marked {} KYC of user {} as {}",
        staff.id,
        payload.kyc_verification_stage,
        payload.user_id,
        status
    );

    Ok((StatusCode::OK, Json(MessageDto::new(status))))
}

/// Set the moderation status of a property.
///
/// # Access Control
/// - `Staff`
#[utoipa::path(
    patch,
    path = "/api/admin/property-moderation",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    request_body = ModeratePropertyDto,
    responses(
        (status = 200, description = "Status updated", body = MessageDto),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not staff", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn moderate_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ModeratePropertyDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &headers).require(&STAFF).await?;

    let status = AdminService::new(&state.db)
        .moderate_property(payload.property_id, &payload.status)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new(status))))
}

/// Decide an ownership request.
///
/// Approval advances the property's stage and adds the requested share to the
/// sold percentage, capped at 100.
///
/// # Access Control
/// - `Staff`
///
/// # Returns
/// - `200 OK` - `{"message": status}`
/// - `400 Bad Request` - Invalid status, or a request of the same role is already approved
/// - `404 Not Found` - Unknown request or property
#[utoipa::path(
    patch,
    path = "/api/admin/ownership-review",
    tag = ADMIN_TAG,
    security(("bearer_auth" = [])),
    request_body = OwnershipReviewDto,
    responses(
        (status = 200, description = "Request decided", body = MessageDto),
        (status = 400, description = "Invalid decision", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not staff", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn review_ownership_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<OwnershipReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &headers).require(&STAFF).await?;

    let status = AdminService::new(&state.db)
        .review_ownership_request(payload.request_id, &payload.status)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new(status))))
}

/// List properties waiting for moderation, oldest first.
///
/// # Access Control
/// - `Staff`
#[utoipa::path(
    get,
    path = "/api/admin/pending-properties",
    tag = ADMIN_TAG,
    params(PaginationParam),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of pending properties", body = PageDto<PropertyListItemDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not staff", body = ErrorDto),
        (status = 404, description = "Invalid page", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pending_properties(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &headers).require(&STAFF).await?;

    let page = AdminService::new(&state.db)
        .pending_properties(params.request()?)
        .await?;

    let app_url = state.app_url.as_str();
    let dto = page.into_dto(&state.url("/api/admin/pending-properties"), |property| {
        property.into_list_item_dto(app_url)
    });

    Ok((StatusCode::OK, Json(dto)))
}

/// List ownership requests waiting for a decision.
///
/// # Access Control
/// - `Staff`
#[utoipa::path(
    get,
    path = "/api/admin/pending-ownership-requests",
    tag = ADMIN_TAG,
    params(PaginationParam),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of pending requests", body = PageDto<OwnershipRequestDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not staff", body = ErrorDto),
        (status = 404, description = "Invalid page", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pending_ownership_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &headers).require(&STAFF).await?;

    let page = AdminService::new(&state.db)
        .pending_ownership_requests(params.request()?)
        .await?;

    let dto = page.into_dto(
        &state.url("/api/admin/pending-ownership-requests"),
        OwnershipRequest::into_dto,
    );

    Ok((StatusCode::OK, Json(dto)))
}
