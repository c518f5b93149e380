use crate::server::{
    data::inspection::InspectionRepository,
    error::AppError,
    model::inspection::{CreateInspectionParam, InspectionStatus},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_for_agent;
