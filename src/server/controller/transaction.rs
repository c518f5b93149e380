use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};

use crate::{
    model::{api::ErrorDto, transaction::TransactionDto},
    server::{
        controller::extract::Json,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::transaction::TransactionLog,
        service::transaction::TransactionService,
        state::AppState,
    },
};

/// Tag for grouping transaction endpoints in OpenAPI documentation
pub static TRANSACTION_TAG: &str = "transactions";

fn into_dtos(logs: Vec<TransactionLog>) -> Vec<TransactionDto> {
    logs.into_iter().map(TransactionLog::into_dto).collect()
}

/// Buy everything in the caller's cart.
///
/// Each cart line is charged separately and gets its own transaction log. A
/// declined charge is still logged. When the payment provider cannot be reached
/// nothing is saved and the cart is kept.
///
/// # Access Control
/// - `Customer`
///
/// # Returns
/// - `201 Created` - One log per cart line
/// - `400 Bad Request` - The cart is empty
#[utoipa::path(
    post,
    path = "/api/transactions/buy_cart_items",
    tag = TRANSACTION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Cart purchased", body = Vec<TransactionDto>),
        (status = 400, description = "Cart is empty", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 500, description = "Payment provider or database error", body = ErrorDto)
    ),
)]
pub async fn purchase_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let logs = TransactionService::new(&state.db, state.payment.as_ref())
        .purchase_cart(&user)
        .await?;

    Ok((StatusCode::CREATED, Json(into_dtos(logs))))
}

/// List sales of the caller's properties, newest first.
///
/// # Access Control
/// - `Agent`
#[utoipa::path(
    get,
    path = "/api/transactions/agent",
    tag = TRANSACTION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction logs", body = Vec<TransactionDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an agent", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn agent_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Agent])
        .await?;

    let logs = TransactionService::new(&state.db, state.payment.as_ref())
        .agent_transactions(user.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(logs))))
}

/// List the caller's purchases, newest first.
///
/// # Access Control
/// - `Customer`
#[utoipa::path(
    get,
    path = "/api/transactions/client",
    tag = TRANSACTION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction logs", body = Vec<TransactionDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn client_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let logs = TransactionService::new(&state.db, state.payment.as_ref())
        .client_transactions(user.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(logs))))
}
