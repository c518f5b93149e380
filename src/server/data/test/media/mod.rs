use crate::server::{
    data::media::MediaRepository,
    error::AppError,
    model::media::{MediaType, StoredFile},
};
use test_utils::{builder::TestBuilder, factory};

mod album;
