use crate::server::{
    data::company::{CompanyRepository, CompanyVerificationRepository},
    error::AppError,
    model::company::{BankInformation, CreateCompanyParam, CreateCompanyVerificationParam},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod set_bank_information;
mod verification;
