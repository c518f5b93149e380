mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, scheduler::cleanup, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let storage = startup::setup_media_storage(&config).await?;
    let payment = startup::setup_payment_gateway(&config, http_client);
    let mailer = startup::setup_mailer(&config);

    // Start cleanup scheduler
    let scheduler_db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = cleanup::start_scheduler(scheduler_db).await {
            tracing::error!("Cleanup scheduler error: {}", e);
        }
    });

    let app = router::router(&config)?.with_state(AppState::new(
        db,
        storage,
        payment,
        mailer,
        config.app_url.clone(),
        config.tokens,
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Starting server on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
