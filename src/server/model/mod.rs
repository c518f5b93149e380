//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.

pub mod auth;
pub mod cart;
pub mod company;
pub mod inspection;
pub mod media;
pub mod notification;
pub mod ownership;
pub mod property;
pub mod review;
pub mod transaction;
pub mod user;

use crate::server::error::internal::InternalError;

/// A fixed set of string codes stored in a text column.
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The stored code of the variant.
    fn as_str(&self) -> &'static str;

    /// Looks up a variant by its exact code.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.as_str() == value)
    }

    /// Decodes a stored column value, treating unknown codes as corrupt data.
    fn from_column(column: &'static str, value: &str) -> Result<Self, InternalError> {
        Self::parse(value).ok_or_else(|| InternalError::UnknownChoice {
            column,
            value: value.to_string(),
        })
    }

    /// Every code joined for use in validation messages.
    fn choices() -> String {
        Self::ALL
            .iter()
            .map(|choice| choice.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Decodes a JSON column into `T`.
pub(crate) fn from_json_column<T: serde::de::DeserializeOwned>(
    column: &'static str,
    value: serde_json::Value,
) -> Result<T, InternalError> {
    serde_json::from_value(value).map_err(|source| InternalError::MalformedJsonColumn { column, source })
}
