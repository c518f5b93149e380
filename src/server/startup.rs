use std::sync::Arc;

use crate::server::{
    config::{Config, PaymentProvider},
    error::AppError,
    service::{
        email::{LogMailSender, Mailer},
        payment::{PaymentGateway, PaystackGateway, SimulatedGateway},
        storage::MediaStorage,
    },
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the schema is up to date
/// before any request is served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for outgoing provider calls.
///
/// Redirects are disabled so a provider response can never bounce requests to an
/// arbitrary host.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - The TLS backend could not be initialised
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}

/// Creates the media directory and its storage handle.
pub async fn setup_media_storage(config: &Config) -> Result<MediaStorage, AppError> {
    tokio::fs::create_dir_all(&config.media_root).await?;

    Ok(MediaStorage::new(config.media_root.clone()))
}

/// Selects the payment gateway named by configuration.
pub fn setup_payment_gateway(
    config: &Config,
    http_client: reqwest::Client,
) -> Arc<dyn PaymentGateway> {
    match &config.payment_provider {
        PaymentProvider::Paystack {
            secret_key,
            base_url,
        } => {
            tracing::info!("Using Paystack payment gateway at {}", base_url);
            Arc::new(PaystackGateway::new(
                http_client,
                secret_key.clone(),
                base_url.clone(),
            ))
        }
        PaymentProvider::Simulated => {
            tracing::warn!("PAYMENT_PROVIDER is simulated, checkout charges are not real");
            Arc::new(SimulatedGateway)
        }
    }
}

/// Builds the mailer. Messages are written to the log.
pub fn setup_mailer(config: &Config) -> Mailer {
    Mailer::new(Arc::new(LogMailSender::new(config.email_from.clone())))
}
