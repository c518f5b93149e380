use crate::server::{
    data::transaction::TransactionLogRepository,
    error::AppError,
    model::transaction::{CreateTransactionLogParam, PaymentMethod, TransactionStatus},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create_many;
mod get_for_agent;
