//! SeaORM entity definitions for the marketplace database.
//!
//! One module per table. The `prelude` re-exports every `Entity` under its
//! table-style name so repositories can write `entity::prelude::Property::find()`.

pub mod prelude;

pub mod auth_token;
pub mod company;
pub mod company_verification;
pub mod email_verification;
pub mod media_album;
pub mod media_file;
pub mod notification;
pub mod password_reset;
pub mod property;
pub mod property_inspection;
pub mod property_ownership;
pub mod review;
pub mod shopping_cart;
pub mod transaction_log;
pub mod user;
