//! Product model: a listing sold directly rather than funded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, User};

/// How a purchased deliverable reaches the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    File,
    Link,
    Email,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::File => "file",
            DeliveryMethod::Link => "link",
            DeliveryMethod::Email => "email",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "file" => Some(DeliveryMethod::File),
            "link" => Some(DeliveryMethod::Link),
            "email" => Some(DeliveryMethod::Email),
            _ => None,
        }
    }
}

/// Product availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            _ => None,
        }
    }
}

/// A product listing.
///
/// `original_price`, when present, is strictly greater than `price` and is
/// only used to render a discount badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    pub main_image: String,
    pub images: Vec<String>,
    pub creator: User,
    pub rating: f32,
    pub review_count: u32,
    pub sales_count: u32,
    pub delivery_method: DeliveryMethod,
    pub tags: Vec<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for registering a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: u64,
    #[serde(default)]
    pub original_price: Option<u64>,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub delivery_method: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub creator: User,
}
