//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through
//! Axum's state extraction. It holds:
//! - Database connection pool
//! - Media storage rooted at the configured upload directory
//! - Payment gateway and background mailer
//! - Public application URL and token lifetimes

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::TokenSettings,
    service::{email::Mailer, payment::PaymentGateway, storage::MediaStorage},
};

/// Application state containing shared resources and dependencies.
///
/// Every field is cheap to clone: the connection pool, `Mailer` and the payment
/// gateway share their internals behind reference counts.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Writes and removes uploaded files below the media root.
    pub storage: MediaStorage,

    /// Charges customers at checkout.
    pub payment: Arc<dyn PaymentGateway>,

    /// Queues transactional email in the background.
    pub mailer: Mailer,

    /// Public base URL of the API.
    ///
    /// Used for media URLs, pagination links and password reset links.
    pub app_url: String,

    /// Lifetimes of issued access and refresh tokens.
    pub tokens: TokenSettings,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `storage` - Media storage for uploads
    /// - `payment` - Payment gateway selected from configuration
    /// - `mailer` - Background email dispatcher
    /// - `app_url` - Application base URL
    /// - `tokens` - Bearer token lifetimes
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        storage: MediaStorage,
        payment: Arc<dyn PaymentGateway>,
        mailer: Mailer,
        app_url: String,
        tokens: TokenSettings,
    ) -> Self {
        Self {
            db,
            storage,
            payment,
            mailer,
            app_url: app_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Absolute URL of an API path, used as the base of pagination links.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.app_url, path)
    }
}
