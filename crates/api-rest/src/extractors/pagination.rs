//! Pagination extractor.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use cv_screen_application::services::Pagination as ServicePagination;
use serde::Deserialize;

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// Query parameters for pagination
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

/// Extracted pagination parameters
#[derive(Debug, Clone)]
pub struct Pagination(pub ServicePagination);

impl Pagination {
    /// Convert into the service-layer pagination type
    pub fn into_service(self) -> ServicePagination {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid pagination parameters: {}", e)))?;

        if query.page == 0 {
            return Err(ApiError::BadRequest(
                "Page number must be greater than 0".to_string(),
            ));
        }
        if query.per_page == 0 || query.per_page > MAX_PER_PAGE {
            return Err(ApiError::BadRequest(format!(
                "Items per page must be within 1..={MAX_PER_PAGE}"
            )));
        }

        Ok(Self(ServicePagination::new(query.page, query.per_page)))
    }
}
