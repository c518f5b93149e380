use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response.
///
/// `payload` maps a field name (or `error` for non-field failures) to its list of
/// messages, while `error` repeats the first message as a flat string.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ErrorDto {
    pub status_code: u16,
    pub error: String,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PageLinksDto {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// One page of a paginated listing.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PageDto<T> {
    pub links: PageLinksDto,
    pub total: u64,
    pub limit: u64,
    pub pages: u64,
    pub results: Vec<T>,
}
