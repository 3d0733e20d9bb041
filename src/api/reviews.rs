//! Review API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, validate_images, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateReviewRequest, Review};
use crate::AppState;

/// Image cap on the review form.
const MAX_REVIEW_IMAGES: usize = 5;
/// Minimum review body length.
const MIN_CONTENT_LENGTH: usize = 10;

/// GET /api/products/:id/reviews - List a product's reviews.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<Vec<Review>> {
    let reviews = state.store.list_reviews(&product_id).await?;
    success(reviews)
}

/// POST /api/products/:id/reviews - Submit a review.
pub async fn create_review(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<CreateReviewRequest>,
) -> ApiResult<Review> {
    if state.store.get_product(&product_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Product {} not found",
            product_id
        )));
    }
    validate_create_review(&request)?;
    let review = state.store.create_review(&product_id, &request).await?;
    tracing::info!(review_id = %review.id, %product_id, "review submitted");
    success(review)
}

fn validate_create_review(request: &CreateReviewRequest) -> Result<(), AppError> {
    if request.author.trim().is_empty() {
        return Err(AppError::MissingField("author"));
    }
    if !(1..=5).contains(&request.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    if request.content.trim().chars().count() < MIN_CONTENT_LENGTH {
        return Err(AppError::BelowMinLength {
            field: "content",
            min: MIN_CONTENT_LENGTH,
        });
    }
    validate_images(&request.images, MAX_REVIEW_IMAGES)?;
    Ok(())
}
