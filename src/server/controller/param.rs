use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::{error::AppError, util::pagination::PageRequest};

/// `?page=N` query of paginated listings.
#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct PaginationParam {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
}

impl PaginationParam {
    pub fn request(&self) -> Result<PageRequest, AppError> {
        PageRequest::new(self.page)
    }
}
