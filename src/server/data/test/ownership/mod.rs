use crate::server::{
    data::ownership::OwnershipRepository,
    error::AppError,
    model::{
        ownership::{CreateOwnershipRequestParam, OwnershipStatus},
        user::Role,
    },
    util::pagination::PageRequest,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod other_approved_exists;
