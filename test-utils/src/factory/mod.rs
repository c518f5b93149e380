//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take their foreign keys as arguments so tests
//! spell out which records are related.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let customer = factory::create_user(&db).await?;
//!
//!     // Create with all dependencies
//!     let (agent, company, property) =
//!         factory::helpers::create_marketplace_property(&db).await?;
//!
//!     factory::create_cart_item(&db, customer.id, property.id, 2).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Customers, agents and staff
//! - `auth_token` - Bearer tokens, email verifications and password resets
//! - `company` - Agent companies
//! - `property` - Listings
//! - `media` - Albums and media files
//! - `cart` - Shopping cart items
//! - `ownership` - Ownership requests
//! - `inspection` - Site visits
//! - `transaction` - Transaction logs
//! - `notification` - Notifications
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod auth_token;
pub mod cart;
pub mod company;
pub mod helpers;
pub mod inspection;
pub mod media;
pub mod notification;
pub mod ownership;
pub mod property;
pub mod transaction;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use auth_token::{create_auth_token, create_email_verification, create_password_reset};
pub use cart::create_cart_item;
pub use company::create_company;
pub use inspection::create_inspection;
pub use media::{create_album, create_media_file};
pub use notification::create_notification;
pub use ownership::create_ownership_request;
pub use property::create_property;
pub use transaction::create_transaction_log;
pub use user::{create_agent, create_staff, create_user};
