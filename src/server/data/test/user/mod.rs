use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParam, OnboardingStage, Role, UpdateProfileParam},
    util::pagination::PageRequest,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_agents_paginated;
mod phone_taken_by_other;
mod set_kyc_stage;
mod update_profile;
