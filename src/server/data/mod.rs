//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! Every repository is generic over `ConnectionTrait` so services can run several of them
//! inside one transaction.

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

use sea_orm::{ActiveValue, Value};

/// Overwrites a required column only when a new value was supplied.
pub(crate) fn set_if_some<T>(column: &mut ActiveValue<T>, value: Option<T>)
where
    T: Into<Value>,
{
    if let Some(value) = value {
        *column = ActiveValue::Set(value);
    }
}

/// Overwrites a nullable column only when a new value was supplied.
pub(crate) fn set_optional<T>(column: &mut ActiveValue<Option<T>>, value: Option<T>)
where
    Option<T>: Into<Value>,
{
    if value.is_some() {
        *column = ActiveValue::Set(value);
    }
}

#[cfg(test)]
mod test;
