//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod categories;
mod fundings;
mod products;
mod projects;
mod purchases;
mod qna;
mod reviews;

pub use categories::*;
pub use fundings::*;
pub use products::*;
pub use projects::*;
pub use purchases::*;
pub use qna::*;
pub use reviews::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Catalog list query parameters shared by the project and product pages.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Category id or the `all` sentinel.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text search query.
    #[serde(default)]
    pub q: Option<String>,
    /// Sort key; unknown keys keep the input order.
    #[serde(default)]
    pub sort: Option<String>,
}

impl CatalogQuery {
    pub fn category_filter(&self) -> crate::catalog::CategoryFilter {
        crate::catalog::CategoryFilter::parse(self.category.as_deref().unwrap_or("all"))
    }

    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    pub fn sort_key(&self) -> Option<crate::catalog::SortKey> {
        self.sort
            .as_deref()
            .and_then(crate::catalog::SortKey::parse)
    }
}

/// Shared image-attachment validation: every form caps the image count,
/// and each data-URL payload is limited to 5 MB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn validate_images(images: &[String], max_count: usize) -> Result<(), AppError> {
    if images.len() > max_count {
        return Err(AppError::TooManyImages { max: max_count });
    }
    for image in images {
        if image.len() > MAX_IMAGE_BYTES {
            return Err(AppError::ImageTooLarge {
                max_bytes: MAX_IMAGE_BYTES,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_validation_enforces_count_and_size() {
        let ok = vec!["data:image/png;base64,aaaa".to_string(); 3];
        assert!(validate_images(&ok, 3).is_ok());

        let too_many = vec!["x".to_string(); 4];
        assert!(matches!(
            validate_images(&too_many, 3),
            Err(AppError::TooManyImages { max: 3 })
        ));

        let huge = vec!["x".repeat(MAX_IMAGE_BYTES + 1)];
        assert!(matches!(
            validate_images(&huge, 3),
            Err(AppError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn catalog_query_defaults_are_identity() {
        let query = CatalogQuery::default();
        assert_eq!(query.category_filter(), crate::catalog::CategoryFilter::All);
        assert_eq!(query.search(), "");
        assert!(query.sort_key().is_none());
    }
}
