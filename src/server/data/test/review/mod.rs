use crate::server::{
    data::review::ReviewRepository, error::AppError, model::review::CreateReviewParam,
};
use test_utils::{builder::TestBuilder, factory};

mod get_for_agent;
