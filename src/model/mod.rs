//! API data transfer objects shared by the HTTP layer.
//!
//! Every type here is serialized to or deserialized from JSON at the edge of the
//! application and documented through `utoipa`. Domain logic never works with these
//! types directly; controllers convert them to params and domain models.

pub mod admin;
pub mod api;
pub mod auth;
pub mod cart;
pub mod company;
pub mod inspection;
pub mod media;
pub mod notification;
pub mod ownership;
pub mod property;
pub mod transaction;
pub mod user;
