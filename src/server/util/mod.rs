//! Shared helpers used across services and controllers.

pub mod date;
pub mod multipart;
pub mod pagination;
pub mod parse;
pub mod random;
pub mod similarity;
