//! Product API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, validate_images, ApiResult, CatalogQuery};
use crate::catalog;
use crate::errors::AppError;
use crate::models::{Category, CreateProductRequest, DeliveryMethod, Product};
use crate::AppState;

/// Image cap on the product registration form.
const MAX_PRODUCT_IMAGES: usize = 6;

/// GET /api/products - List products through the catalog query pipeline.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Vec<Product>> {
    let products = state.store.list_products().await?;
    let products = catalog::apply_query(
        products,
        query.category_filter(),
        query.search(),
        query.sort_key(),
    );
    success(products)
}

/// GET /api/products/:id - Get a single product.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    match state.store.get_product(&id).await? {
        Some(product) => success(product),
        None => Err(AppError::NotFound(format!("Product {} not found", id))),
    }
}

/// POST /api/products - Register a new product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<Product> {
    validate_create_product(&request)?;
    let product = state.store.create_product(&request).await?;
    tracing::info!(product_id = %product.id, "product registered");
    success(product)
}

fn validate_create_product(request: &CreateProductRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::MissingField("title"));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::MissingField("description"));
    }
    if Category::from_str(&request.category).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown category '{}'",
            request.category
        )));
    }
    if request.price == 0 {
        return Err(AppError::Validation(
            "Price must be positive".to_string(),
        ));
    }
    // The discount badge only makes sense for a real discount.
    if let Some(original) = request.original_price {
        if original <= request.price {
            return Err(AppError::InvalidPriceRelation);
        }
    }
    if DeliveryMethod::from_str(&request.delivery_method).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown delivery method '{}'",
            request.delivery_method
        )));
    }
    validate_images(&request.images, MAX_PRODUCT_IMAGES)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{User, UserRole};

    fn valid_request() -> CreateProductRequest {
        CreateProductRequest {
            title: "새 제품".to_string(),
            description: "설명".to_string(),
            category: "design-resource".to_string(),
            price: 29_000,
            original_price: Some(49_000),
            main_image: None,
            images: Vec::new(),
            delivery_method: "file".to_string(),
            tags: vec!["디자인".to_string()],
            creator: User {
                id: "1".to_string(),
                name: "최디자인".to_string(),
                email: "ui@example.com".to_string(),
                profile_image: None,
                role: UserRole::Creator,
                followers: 0,
                following: 0,
                likes: 0,
            },
        }
    }

    #[test]
    fn accepts_a_complete_request() {
        assert!(validate_create_product(&valid_request()).is_ok());
    }

    #[test]
    fn rejects_original_price_not_above_price() {
        let mut request = valid_request();
        request.original_price = Some(29_000);
        assert!(matches!(
            validate_create_product(&request),
            Err(AppError::InvalidPriceRelation)
        ));

        request.original_price = Some(10_000);
        assert!(matches!(
            validate_create_product(&request),
            Err(AppError::InvalidPriceRelation)
        ));

        // Absent originalPrice simply means no discount badge.
        request.original_price = None;
        assert!(validate_create_product(&request).is_ok());
    }

    #[test]
    fn rejects_zero_price() {
        let mut request = valid_request();
        request.price = 0;
        assert!(matches!(
            validate_create_product(&request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_unknown_delivery_method() {
        let mut request = valid_request();
        request.delivery_method = "carrier-pigeon".to_string();
        assert!(matches!(
            validate_create_product(&request),
            Err(AppError::Validation(_))
        ));
    }
}
