//! Product review model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A buyer review left on a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub author: String,
    /// 1–5 stars.
    pub rating: u8,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for submitting a review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub rating: u8,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub images: Vec<String>,
}
