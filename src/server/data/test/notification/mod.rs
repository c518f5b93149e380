use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::{
        notification::{NewNotification, NotificationStatus},
        user::Role,
    },
    util::pagination::PageRequest,
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create_many;
mod delete_read_before;
mod mark_read;
