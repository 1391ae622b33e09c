//! Shared response envelope types for API handlers.

use movies_core::movie::Movie;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope for collection endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of the movie listing plus the metadata clients page with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviesResponse {
    pub items: Vec<Movie>,
    pub page: i64,
    pub page_size: i64,
    /// Number of movies matching the filters across all pages.
    pub total: i64,
    pub has_next_page: bool,
}

impl MoviesResponse {
    pub fn new(items: Vec<Movie>, page: i64, page_size: i64, total: i64) -> Self {
        Self {
            items,
            page,
            page_size,
            total,
            has_next_page: total > page.saturating_mul(page_size),
        }
    }
}
