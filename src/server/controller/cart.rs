use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        cart::{AddToCartDto, CartDto, CartItemDto, UpdateCartItemDto},
    },
    server::{
        controller::extract::{Json, Path},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::cart::CartService,
        state::AppState,
    },
};

/// Tag for grouping cart endpoints in OpenAPI documentation
pub static CART_TAG: &str = "cart";

/// Get the caller's cart with line subtotals and the cart total.
///
/// # Access Control
/// - `Customer`
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = CART_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart contents", body = CartDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let cart = CartService::new(&state.db).list_cart(&user).await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

/// Add shares of a property to the cart.
///
/// Adding a property that is already in the cart sums the quantities.
///
/// # Access Control
/// - `Customer`
///
/// # Returns
/// - `201 Created` - The cart line
/// - `400 Bad Request` - Invalid quantity, or the property cannot be bought
/// - `404 Not Found` - No property with that id
#[utoipa::path(
    post,
    path = "/api/cart",
    tag = CART_TAG,
    security(("bearer_auth" = [])),
    request_body = AddToCartDto,
    responses(
        (status = 201, description = "Item added", body = CartItemDto),
        (status = 400, description = "Property not available or invalid quantity", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AddToCartDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let item = CartService::new(&state.db)
        .add_to_cart(&user, payload.property, payload.quantity.unwrap_or(1))
        .await?;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

/// Change the quantity of a cart line.
///
/// # Access Control
/// - `Customer` - Owner of the cart line
#[utoipa::path(
    patch,
    path = "/api/cart/{item_id}",
    tag = CART_TAG,
    params(
        ("item_id" = i32, Path, description = "Cart line id")
    ),
    security(("bearer_auth" = [])),
    request_body = UpdateCartItemDto,
    responses(
        (status = 200, description = "Item updated", body = CartItemDto),
        (status = 400, description = "Invalid quantity", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 404, description = "Cart item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i32>,
    Json(payload): Json<UpdateCartItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    let item = CartService::new(&state.db)
        .update_cart_item(&user, item_id, payload.quantity)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Remove a line from the cart.
///
/// # Access Control
/// - `Customer` - Owner of the cart line
#[utoipa::path(
    delete,
    path = "/api/cart/{item_id}",
    tag = CART_TAG,
    params(
        ("item_id" = i32, Path, description = "Cart line id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Item removed"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a customer", body = ErrorDto),
        (status = 404, description = "Cart item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Customer])
        .await?;

    CartService::new(&state.db)
        .remove_cart_item(&user, item_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
