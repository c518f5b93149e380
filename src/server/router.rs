use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{admin, api, auth, cart, company, inspection, media, notification, ownership, property, transaction, user},
    server::{
        config::Config,
        controller,
        error::{config::ConfigError, AppError},
        state::AppState,
    },
};

/// Largest accepted request body (64 MiB), enough for a full set of property uploads.
const MAX_BODY_SIZE: usize = 64 * 1024 * 1024;

/// Registers the `bearer_auth` scheme referenced by protected endpoints.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerSecurity),
    paths(
        controller::auth::signup,
        controller::auth::login,
        controller::auth::verify_email,
        controller::auth::resend_verification,
        controller::auth::refresh,
        controller::auth::logout,
        controller::auth::request_password_reset,
        controller::auth::check_password_reset,
        controller::auth::set_new_password,

        controller::user::get_profile,
        controller::user::update_profile,
        controller::user::add_business,
        controller::user::add_bank_information,
        controller::user::business_profile,
        controller::user::list_agents,
        controller::user::create_review,

        controller::property::create_property,
        controller::property::list_marketplace,
        controller::property::list_agent_properties,
        controller::property::get_property,
        controller::property::update_property,
        controller::property::archive_property,
        controller::property::delete_media,
        controller::property::get_stay_periods,
        controller::property::add_stay_periods,
        controller::property::delete_stay_period,
        controller::property::request_ownership,
        controller::property::list_my_ownership_requests,

        controller::cart::list_cart,
        controller::cart::add_to_cart,
        controller::cart::update_cart_item,
        controller::cart::remove_cart_item,

        controller::transaction::purchase_cart,
        controller::transaction::agent_transactions,
        controller::transaction::client_transactions,

        controller::inspection::schedule_inspection,
        controller::inspection::agent_inspections,
        controller::inspection::client_inspections,
        controller::inspection::respond_to_inspection,
        controller::inspection::cancel_inspection,

        controller::notification::list_notifications,
        controller::notification::unread_count,
        controller::notification::mark_read,
        controller::notification::mark_all_read,

        controller::admin::kyc_verification,
        controller::admin::moderate_property,
        controller::admin::review_ownership_request,
        controller::admin::pending_properties,
        controller::admin::pending_ownership_requests,
    ),
    components(schemas(
        api::ErrorDto,
        api::MessageDto,
        api::PageLinksDto,
        admin::KycVerificationDto,
        admin::ModeratePropertyDto,
        admin::OwnershipReviewDto,
        auth::SignupDto,
        auth::SignupResponseDto,
        auth::VerifyEmailDto,
        auth::EmailDto,
        auth::LoginDto,
        auth::TokensDto,
        auth::LoginResponseDto,
        auth::RefreshTokenDto,
        auth::AccessTokenDto,
        auth::PasswordResetCheckDto,
        auth::SetNewPasswordDto,
        cart::AddToCartDto,
        cart::UpdateCartItemDto,
        cart::CartPropertyDto,
        cart::CartItemDto,
        cart::CartDto,
        company::BankInformationDto,
        company::CompanyDto,
        company::AddBankInformationDto,
        company::BankInformationListDto,
        inspection::ScheduleInspectionDto,
        inspection::RespondInspectionDto,
        inspection::InspectionDto,
        media::MediaFileDto,
        media::MediaAlbumDto,
        notification::NotificationDto,
        notification::UnreadCountDto,
        ownership::RequestOwnershipDto,
        ownership::OwnershipRequestDto,
        property::PropertyDto,
        property::PropertyListItemDto,
        property::ArchivePropertyDto,
        property::StayPeriodsDto,
        transaction::TransactionDto,
        user::StagesDto,
        user::ProfileDto,
        user::AgentDto,
        user::ReviewerDto,
        user::ReviewDto,
        user::CreateReviewDto,
        user::BusinessProfileDto,
    )),
    tags(
        (name = "auth", description = "Signup, login, tokens and password reset"),
        (name = "users", description = "Profiles, business registration and reviews"),
        (name = "properties", description = "Listings, media, stays and ownership requests"),
        (name = "cart", description = "Shopping cart of property shares"),
        (name = "transactions", description = "Checkout and transaction history"),
        (name = "inspections", description = "Site visit bookings"),
        (name = "notifications", description = "In-app notifications"),
        (name = "admin", description = "Staff moderation and KYC decisions"),
    ),
    info(
        title = "Estate Market API",
        version = "0.1.0",
        description = "Fractional real estate marketplace"
    )
)]
pub struct ApiDoc;

fn api_routes() -> Router<AppState> {
    use controller::{admin, auth, cart, inspection, notification, property, transaction, user};

    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify-email", post(auth::verify_email))
        .route("/api/auth/resend-verification", post(auth::resend_verification))
        .route("/api/auth/token/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route(
            "/api/auth/request-reset-password-email",
            post(auth::request_password_reset),
        )
        .route(
            "/api/auth/password-reset/{user_id}/{token}",
            get(auth::check_password_reset),
        )
        // Emailed reset links end with a slash
        .route(
            "/api/auth/password-reset/{user_id}/{token}/",
            get(auth::check_password_reset),
        )
        .route("/api/auth/set-new-password", patch(auth::set_new_password))
        .route(
            "/api/users/profile",
            get(user::get_profile).patch(user::update_profile),
        )
        .route("/api/users/add_business", post(user::add_business))
        .route(
            "/api/users/add_bank_information",
            patch(user::add_bank_information),
        )
        .route(
            "/api/users/business_profile/{user_id}",
            get(user::business_profile),
        )
        .route("/api/users/agents", get(user::list_agents))
        .route("/api/users/{agent_id}/reviews", post(user::create_review))
        .route("/api/properties/new", post(property::create_property))
        .route("/api/properties/marketplace", get(property::list_marketplace))
        .route("/api/properties/mine", get(property::list_agent_properties))
        .route(
            "/api/properties/ownership/mine",
            get(property::list_my_ownership_requests),
        )
        .route(
            "/api/properties/{id}",
            get(property::get_property).patch(property::update_property),
        )
        .route("/api/properties/{id}/archive", patch(property::archive_property))
        .route(
            "/api/properties/{id}/media/{media_id}",
            delete(property::delete_media),
        )
        .route(
            "/api/properties/{id}/stay_periods",
            get(property::get_stay_periods).patch(property::add_stay_periods),
        )
        .route(
            "/api/properties/{id}/stay_periods/{index}",
            delete(property::delete_stay_period),
        )
        .route(
            "/api/properties/{id}/ownership",
            post(property::request_ownership),
        )
        .route("/api/cart", get(cart::list_cart).post(cart::add_to_cart))
        .route(
            "/api/cart/{item_id}",
            patch(cart::update_cart_item).delete(cart::remove_cart_item),
        )
        .route("/api/transactions/agent", get(transaction::agent_transactions))
        .route("/api/transactions/client", get(transaction::client_transactions))
        .route(
            "/api/transactions/buy_cart_items",
            post(transaction::purchase_cart),
        )
        .route("/api/inspections", post(inspection::schedule_inspection))
        .route("/api/inspections/agent", get(inspection::agent_inspections))
        .route("/api/inspections/client", get(inspection::client_inspections))
        .route(
            "/api/inspections/{id}/respond",
            patch(inspection::respond_to_inspection),
        )
        .route(
            "/api/inspections/{id}/cancel",
            patch(inspection::cancel_inspection),
        )
        .route("/api/notifications", get(notification::list_notifications))
        .route(
            "/api/notifications/unread_count",
            get(notification::unread_count),
        )
        .route("/api/notifications/read_all", patch(notification::mark_all_read))
        .route("/api/notifications/{id}/read", patch(notification::mark_read))
        .route("/api/admin/kyc-verification", patch(admin::kyc_verification))
        .route(
            "/api/admin/property-moderation",
            patch(admin::moderate_property),
        )
        .route(
            "/api/admin/ownership-review",
            patch(admin::review_ownership_request),
        )
        .route(
            "/api/admin/pending-properties",
            get(admin::pending_properties),
        )
        .route(
            "/api/admin/pending-ownership-requests",
            get(admin::pending_ownership_requests),
        )
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origin == "*" {
        return Ok(layer.allow_origin(Any));
    }

    let origin = HeaderValue::from_str(allowed_origin).map_err(|e| ConfigError::InvalidEnvVar {
        name: "CORS_ALLOWED_ORIGIN".to_string(),
        reason: e.to_string(),
    })?;

    Ok(layer.allow_origin(origin))
}

/// Builds the full application router.
///
/// Serves the API, uploaded media under `/media` and Swagger UI at `/api/docs`.
///
/// # Returns
/// - `Ok(Router)` - Router waiting for its `AppState`
/// - `Err(AppError::ConfigErr)` - `CORS_ALLOWED_ORIGIN` is not a valid header value
pub fn router(config: &Config) -> Result<Router<AppState>, AppError> {
    Ok(api_routes()
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/media", ServeDir::new(&config.media_root))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(cors_layer(&config.cors_allowed_origin)?)
        .layer(TraceLayer::new_for_http()))
}
