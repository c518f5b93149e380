//! Page-number pagination shared by all listing endpoints.

use crate::{
    model::api::{PageDto, PageLinksDto},
    server::error::AppError,
};

/// Fixed page size for every paginated listing.
pub const PAGE_SIZE: u64 = 10;

/// A validated 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    pub page: u64,
}

impl PageRequest {
    /// Builds a page request, defaulting to the first page.
    ///
    /// # Returns
    /// - `Ok(PageRequest)` - Page number is 1 or greater
    /// - `Err(AppError::NotFound)` - Page 0 was requested
    pub fn new(page: Option<u64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(invalid_page());
        }
        Ok(Self { page })
    }

    /// Zero-based index handed to SeaORM's paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

/// One page of domain items with the total count across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
}

impl<T> Page<T> {
    /// Wraps a fetched page, rejecting pages past the last one.
    ///
    /// The first page of an empty listing is valid.
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Result<Self, AppError> {
        let pages = total_pages(total);
        if request.page > pages.max(1) {
            return Err(invalid_page());
        }

        Ok(Self {
            items,
            total,
            page: request.page,
        })
    }

    /// Converts the page into its response DTO.
    ///
    /// # Arguments
    /// - `base_url` - Absolute URL of the listing endpoint without a query string
    /// - `convert` - Maps each domain item to its DTO
    pub fn into_dto<D>(self, base_url: &str, convert: impl FnMut(T) -> D) -> PageDto<D> {
        let pages = total_pages(self.total);
        let link = |page: u64| format!("{}?page={}", base_url, page);

        PageDto {
            links: PageLinksDto {
                next: (self.page < pages).then(|| link(self.page + 1)),
                previous: (self.page > 1).then(|| link(self.page - 1)),
            },
            total: self.total,
            limit: PAGE_SIZE,
            pages,
            results: self.items.into_iter().map(convert).collect(),
        }
    }
}

fn total_pages(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

fn invalid_page() -> AppError {
    AppError::NotFound("Invalid page.".to_string())
}
