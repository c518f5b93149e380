use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PageDto},
        company::{AddBankInformationDto, BankInformationListDto, CompanyDto},
        user::{AgentDto, BusinessProfileDto, CreateReviewDto, ProfileDto, ReviewDto},
    },
    server::{
        controller::{extract::{Json, Path, Query}, param::PaginationParam},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::{company::CompanyService, review::ReviewService, user::UserService},
        state::AppState,
        util::multipart::MultipartForm,
    },
};

/// Tag for grouping user and business endpoints in OpenAPI documentation
pub static USER_TAG: &str = "users";

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    /// Profile to show instead of the caller's own
    pub user_id: Option<i32>,
}

/// Get a user profile.
///
/// Returns the caller's profile, or the profile of `user_id` when given.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - The profile with its identity document album
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - No user with that id
#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = USER_TAG,
    params(ProfileQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User profile", body = ProfileDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ProfileQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let profile = UserService::new(&state.db, &state.storage)
        .get_profile(query.user_id.unwrap_or(user.id))
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto(&state.app_url))))
}

/// Complete or update the caller's profile.
///
/// Multipart form with the personal fields, `identity_document_type`,
/// `proof_of_address_document`, an optional `display_photo` and two
/// `identity_documents` files.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - The updated profile
/// - `400 Bad Request` - A field or file broke its rules
/// - `409 Conflict` - The phone number belongs to another user
#[utoipa::path(
    patch,
    path = "/api/users/profile",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "Profile fields and documents"),
    responses(
        (status = 200, description = "Profile updated", body = ProfileDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 409, description = "Phone already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let form = MultipartForm::from_multipart(multipart).await?;
    let profile = UserService::new(&state.db, &state.storage)
        .update_profile(&user, &form)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto(&state.app_url))))
}

/// Register the agent's business.
///
/// When `registration_number` and `registered_company_name` are sent, the company
/// registry is consulted and `is_verified` reports the outcome.
///
/// # Access Control
/// - `Agent`
///
/// # Returns
/// - `201 Created` - The new company
/// - `400 Bad Request` - A field or file broke its rules
/// - `403 Forbidden` - Caller is not an agent
/// - `409 Conflict` - Phone, email or the caller's company already exists
#[utoipa::path(
    post,
    path = "/api/users/add_business",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "Company fields, logo and certificate"),
    responses(
        (status = 201, description = "Company registered", body = CompanyDto),
        (status = 400, description = "Invalid company data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an agent", body = ErrorDto),
        (status = 409, description = "Company data already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let form = MultipartForm::from_multipart(multipart).await?;
    let (company, is_verified) = CompanyService::new(&state.db, &state.storage)
        .create_company(&user, &form)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(company.into_dto(&state.app_url, is_verified)),
    ))
}

/// Add bank information to the agent's company.
///
/// # Access Control
/// - `Agent`
///
/// # Returns
/// - `200 OK` - The company's full bank information list
/// - `400 Bad Request` - Wrong keys or invalid values
/// - `404 Not Found` - Caller has no company
#[utoipa::path(
    patch,
    path = "/api/users/add_bank_information",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = AddBankInformationDto,
    responses(
        (status = 200, description = "Bank information saved", body = BankInformationListDto),
        (status = 400, description = "Invalid bank information", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an agent", body = ErrorDto),
        (status = 404, description = "Company not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_bank_information(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AddBankInformationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let bank_information = CompanyService::new(&state.db, &state.storage)
        .add_bank_information(&user, &payload.bank_information)
        .await?;

    Ok((
        StatusCode::OK,
        Json(BankInformationListDto {
            bank_information: bank_information.into_iter().map(|b| b.into_dto()).collect(),
        }),
    ))
}

/// Get the public business page of a user.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Profile, company, listings, reviews and average rating
/// - `404 Not Found` - No user with that id
#[utoipa::path(
    get,
    path = "/api/users/business_profile/{user_id}",
    tag = USER_TAG,
    params(
        ("user_id" = i32, Path, description = "Owner of the business")
    ),
    responses(
        (status = 200, description = "Business profile", body = BusinessProfileDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn business_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let profile = CompanyService::new(&state.db, &state.storage)
        .business_profile(user_id)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto(&state.app_url))))
}

/// List agents.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - One page of agents ordered by id
/// - `404 Not Found` - Page past the last one
#[utoipa::path(
    get,
    path = "/api/users/agents",
    tag = USER_TAG,
    params(PaginationParam),
    responses(
        (status = 200, description = "Page of agents", body = PageDto<AgentDto>),
        (status = 404, description = "Invalid page", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_agents(
    State(state): State<AppState>,
    Query(params): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let page = UserService::new(&state.db, &state.storage)
        .list_agents(params.request()?)
        .await?;

    let app_url = state.app_url.as_str();
    let dto = page.into_dto(&state.url("/api/users/agents"), |agent| {
        agent.into_agent_dto(app_url)
    });

    Ok((StatusCode::OK, Json(dto)))
}

/// Review an agent.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `201 Created` - The stored review
/// - `400 Bad Request` - Invalid rating, nothing to store, or a self review
/// - `404 Not Found` - No agent with that id
#[utoipa::path(
    post,
    path = "/api/users/{agent_id}/reviews",
    tag = USER_TAG,
    params(
        ("agent_id" = i32, Path, description = "Agent being reviewed")
    ),
    security(("bearer_auth" = [])),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 400, description = "Invalid review", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Agent not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(agent_id): Path<i32>,
    Json(payload): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Authenticated])
        .await?;

    let review = ReviewService::new(&state.db)
        .create_review(&user, agent_id, payload.rating, payload.review)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(review.into_dto(&user, &state.app_url)),
    ))
}
