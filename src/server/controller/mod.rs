//! HTTP request handlers.
//!
//! Each handler authenticates through `AuthGuard`, turns the request into the
//! arguments of one service call and maps the domain result to its DTO. Every
//! handler is documented with `utoipa::path` and collected in the router's `ApiDoc`.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod extract;
pub mod inspection;
pub mod notification;
pub mod param;
pub mod property;
pub mod transaction;
pub mod user;
