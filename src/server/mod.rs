//! Marketplace backend: HTTP API, business rules and persistence.
//!
//! Axum serves the JSON API and SeaORM talks to SQLite. Code is split by layer:
//!
//! - `controller/` - one module per API tag; checks access, calls a service, returns DTOs
//! - `service/` - KYC, listing, cart, checkout, inspection and moderation rules
//! - `data/` - repositories over `ConnectionTrait`, usable inside a transaction
//! - `model/` - domain models and per-operation params
//! - `error/` - `AppError` and its JSON error body
//! - `middleware/` - bearer token `AuthGuard` and `Permission`
//! - `util/` - parsing, dates, pagination, multipart buffering
//!
//! `config`, `state`, `startup` and `router` wire these together at boot, and
//! `scheduler/` runs the hourly cleanup job.
//!
//! A request goes router -> controller (`AuthGuard::require`) -> service ->
//! repository -> domain model -> DTO.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
