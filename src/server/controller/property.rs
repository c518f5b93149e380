use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, MessageDto, PageDto},
        ownership::{OwnershipRequestDto, RequestOwnershipDto},
        property::{
            ArchivePropertyDto, MarketplaceQuery, PropertyDto, PropertyListItemDto,
            StayPeriodsDto,
        },
    },
    server::{
        controller::{extract::{Json, Path, Query}, param::PaginationParam},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::property::{MarketplaceFilter, StayPeriod},
        service::{ownership::OwnershipService, property::PropertyService},
        state::AppState,
        util::{multipart::MultipartForm, pagination::PageRequest},
    },
};

/// Tag for grouping property endpoints in OpenAPI documentation
pub static PROPERTY_TAG: &str = "properties";

fn stay_periods_dto(stays: Vec<StayPeriod>) -> StayPeriodsDto {
    StayPeriodsDto {
        stay_periods: stays
            .into_iter()
            .map(|period| {
                period
                    .iter()
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .collect()
            })
            .collect(),
    }
}

/// List a new property.
///
/// Multipart form with the property fields, up to 5 `images`, up to 6
/// `documents` and an optional `default_image`. List fields are comma separated.
///
/// # Access Control
/// - `Agent` - The caller must also own a registered business
///
/// # Returns
/// - `201 Created` - `{"message":"successful"}`
/// - `400 Bad Request` - Invalid fields or uploads, or no registered business
/// - `403 Forbidden` - Caller is not an agent
#[utoipa::path(
    post,
    path = "/api/properties/new",
    tag = PROPERTY_TAG,
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "Property fields and media"),
    responses(
        (status = 201, description = "Property listed", body = MessageDto),
        (status = 400, description = "Invalid property data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an agent", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let form = MultipartForm::from_multipart(multipart).await?;
    PropertyService::new(&state.db, &state.storage)
        .create_property(&user, &form)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageDto::new("successful"))))
}

/// Browse the marketplace.
///
/// Approved, non-archived properties, newest first.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/properties/marketplace",
    tag = PROPERTY_TAG,
    params(MarketplaceQuery),
    responses(
        (status = 200, description = "Page of properties", body = PageDto<PropertyListItemDto>),
        (status = 400, description = "Invalid stage filter", body = ErrorDto),
        (status = 404, description = "Invalid page", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_marketplace(
    State(state): State<AppState>,
    Query(query): Query<MarketplaceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = MarketplaceFilter::from_query(&query)?;
    let page = PropertyService::new(&state.db, &state.storage)
        .list_marketplace(&filter, PageRequest::new(query.page)?)
        .await?;

    let app_url = state.app_url.as_str();
    let dto = page.into_dto(&state.url("/api/properties/marketplace"), |property| {
        property.into_list_item_dto(app_url)
    });

    Ok((StatusCode::OK, Json(dto)))
}

/// List the caller's own properties, newest first.
///
/// # Access Control
/// - `Agent`
#[utoipa::path(
    get,
    path = "/api/properties/mine",
    tag = PROPERTY_TAG,
    params(PaginationParam),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of properties", body = PageDto<PropertyListItemDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an agent", body = ErrorDto),
        (status = 404, description = "Invalid page", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_agent_properties(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let page = PropertyService::new(&state.db, &state.storage)
        .list_agent_properties(user.id, params.request()?)
        .await?;

    let app_url = state.app_url.as_str();
    let dto = page.into_dto(&state.url("/api/properties/mine"), |property| {
        property.into_list_item_dto(app_url)
    });

    Ok((StatusCode::OK, Json(dto)))
}

/// Get one of the caller's properties with its albums.
///
/// # Access Control
/// - `Agent` - Owner of the property
///
/// # Returns
/// - `200 OK` - The full property
/// - `403 Forbidden` - The property belongs to another agent
/// - `404 Not Found` - No property with that id
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Property", body = PropertyDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Property belongs to another user", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let property = PropertyService::new(&state.db, &state.storage)
        .get_property(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(property.into_dto(&state.app_url))))
}

/// Partially update one of the caller's properties.
///
/// New `images` and `documents` are appended to the existing albums.
///
/// # Access Control
/// - `Agent` - Owner of the property
#[utoipa::path(
    patch,
    path = "/api/properties/{id}",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id")
    ),
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "Changed fields and new media"),
    responses(
        (status = 200, description = "Updated property", body = PropertyDto),
        (status = 400, description = "Invalid property data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Property belongs to another user", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let form = MultipartForm::from_multipart(multipart).await?;
    let property = PropertyService::new(&state.db, &state.storage)
        .update_property(&user, id, &form)
        .await?;

    Ok((StatusCode::OK, Json(property.into_dto(&state.app_url))))
}

/// Archive or restore one of the caller's properties.
///
/// Archived properties leave the marketplace and cannot be bought.
///
/// # Access Control
/// - `Agent` - Owner of the property
#[utoipa::path(
    patch,
    path = "/api/properties/{id}/archive",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id")
    ),
    security(("bearer_auth" = [])),
    request_body = ArchivePropertyDto,
    responses(
        (status = 200, description = "Archive flag updated", body = PropertyListItemDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Property belongs to another user", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn archive_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArchivePropertyDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let property = PropertyService::new(&state.db, &state.storage)
        .archive_property(&user, id, payload.archived)
        .await?;

    Ok((
        StatusCode::OK,
        Json(property.into_list_item_dto(&state.app_url)),
    ))
}

/// Delete one image or document of a property.
///
/// # Access Control
/// - `Agent` - Owner of the property
///
/// # Returns
/// - `204 No Content` - File row and stored file removed
/// - `404 Not Found` - The media is not attached to this property
#[utoipa::path(
    delete,
    path = "/api/properties/{id}/media/{media_id}",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id"),
        ("media_id" = i32, Path, description = "Media file id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Property belongs to another user", body = ErrorDto),
        (status = 404, description = "Media not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, media_id)): Path<(Uuid, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    PropertyService::new(&state.db, &state.storage)
        .delete_media(&user, id, media_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the scheduled stays of a property.
///
/// # Access Control
/// - `Agent` - Owner of the property
#[utoipa::path(
    get,
    path = "/api/properties/{id}/stay_periods",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Scheduled stays", body = StayPeriodsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Property belongs to another user", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stay_periods(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let stays = PropertyService::new(&state.db, &state.storage)
        .get_stay_periods(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(stay_periods_dto(stays))))
}

/// Append scheduled stays to a property.
///
/// # Access Control
/// - `Agent` - Owner of the property
///
/// # Returns
/// - `200 OK` - The full list of stays
/// - `400 Bad Request` - No periods, or a period that is not a valid date pair
#[utoipa::path(
    patch,
    path = "/api/properties/{id}/stay_periods",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id")
    ),
    security(("bearer_auth" = [])),
    request_body = StayPeriodsDto,
    responses(
        (status = 200, description = "Scheduled stays", body = StayPeriodsDto),
        (status = 400, description = "Invalid stay periods", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Property belongs to another user", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_stay_periods(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<StayPeriodsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let stays = PropertyService::new(&state.db, &state.storage)
        .add_stay_periods(&user, id, &payload.stay_periods)
        .await?;

    Ok((StatusCode::OK, Json(stay_periods_dto(stays))))
}

/// Remove one scheduled stay by its index.
///
/// # Access Control
/// - `Agent` - Owner of the property
///
/// # Returns
/// - `200 OK` - The remaining stays
/// - `400 Bad Request` - Index out of range
#[utoipa::path(
    delete,
    path = "/api/properties/{id}/stay_periods/{index}",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id"),
        ("index" = usize, Path, description = "Position of the stay, starting at 0")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Remaining stays", body = StayPeriodsDto),
        (status = 400, description = "Index out of range", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Property belongs to another user", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_stay_period(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let stays = PropertyService::new(&state.db, &state.storage)
        .delete_stay_period(&user, id, index)
        .await?;

    Ok((StatusCode::OK, Json(stay_periods_dto(stays))))
}

/// Request a share of a property.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `201 Created` - The pending request
/// - `400 Bad Request` - Percentage out of range or above what is unsold
/// - `404 Not Found` - No property with that id
/// - `409 Conflict` - The caller already has a pending request for it
#[utoipa::path(
    post,
    path = "/api/properties/{id}/ownership",
    tag = PROPERTY_TAG,
    params(
        ("id" = Uuid, Path, description = "Property id")
    ),
    security(("bearer_auth" = [])),
    request_body = RequestOwnershipDto,
    responses(
        (status = 201, description = "Request created", body = OwnershipRequestDto),
        (status = 400, description = "Invalid percentage", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 409, description = "Pending request exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_ownership(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<RequestOwnershipDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let request = OwnershipService::new(&state.db)
        .request_ownership(&user, id, payload.percentage_ownership)
        .await?;

    Ok((StatusCode::CREATED, Json(request.into_dto())))
}

/// List the caller's ownership requests.
///
/// # Access Control
/// - `Authenticated`
#[utoipa::path(
    get,
    path = "/api/properties/ownership/mine",
    tag = PROPERTY_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ownership requests", body = Vec<OwnershipRequestDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_ownership_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let requests = OwnershipService::new(&state.db)
        .list_my_requests(&user)
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            requests
                .into_iter()
                .map(|request| request.into_dto())
                .collect::<Vec<OwnershipRequestDto>>(),
        ),
    ))
}
