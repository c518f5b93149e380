use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, PageDto},
        notification::{NotificationDto, UnreadCountDto},
    },
    server::{
        controller::{extract::{Json, Path, Query}, param::PaginationParam},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::notification::Notification,
        service::notification::NotificationService,
        state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notifications";

/// List the caller's notifications, newest first.
///
/// # Access Control
/// - `Authenticated`
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(PaginationParam),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of notifications", body = PageDto<NotificationDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Invalid page", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let page = NotificationService::new(&state.db)
        .list(user.id, params.request()?)
        .await?;

    let dto = page.into_dto(&state.url("/api/notifications"), Notification::into_dto);

    Ok((StatusCode::OK, Json(dto)))
}

/// Count the caller's unread notifications.
///
/// # Access Control
/// - `Authenticated`
#[utoipa::path(
    get,
    path = "/api/notifications/unread_count",
    tag = NOTIFICATION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let unread = NotificationService::new(&state.db)
        .unread_count(user.id)
        .await?;

    Ok((StatusCode::OK, Json(UnreadCountDto { unread })))
}

/// Mark one of the caller's notifications as read.
///
/// # Access Control
/// - `Authenticated` - Owner of the notification
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(
        ("id" = i32, Path, description = "Notification id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notification read", body = NotificationDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let notification = NotificationService::new(&state.db)
        .mark_read(user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(notification.into_dto())))
}

/// Mark every unread notification of the caller as read.
///
/// # Access Control
/// - `Authenticated`
#[utoipa::path(
    patch,
    path = "/api/notifications/read_all",
    tag = NOTIFICATION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications read", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let count = NotificationService::new(&state.db)
        .mark_all_read(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(format!("{} notifications marked as read", count))),
    ))
}
