use crate::server::{
    data::property::PropertyRepository,
    error::AppError,
    model::property::{
        CompletionStatus, CreatePropertyParam, MarketplaceFilter, ModerationStatus,
        OwnershipStage, PropertyFields,
    },
    util::pagination::PageRequest,
};
use chrono::{Duration, NaiveDate, Utc};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create;
mod get_marketplace_paginated;
mod get_pending_paginated;
mod update;
