//! Purchase API endpoints.
//!
//! Unlike funding, a purchase is a single step: the original application
//! navigates straight to the completion page with no confirm/success modal
//! pair. That asymmetry is product behavior and is kept as-is.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreatePurchaseRequest, ProductStatus, Purchase, TransactionStatus};
use crate::AppState;

/// POST /api/products/:id/purchases - Buy a product in one step.
pub async fn create_purchase(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<CreatePurchaseRequest>,
) -> ApiResult<Purchase> {
    let product = state
        .store
        .get_product(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

    if product.status != ProductStatus::Active {
        return Err(AppError::Validation(format!(
            "Product {} is not for sale",
            product_id
        )));
    }

    let buyer = request.buyer_id.as_deref().unwrap_or("anonymous");
    let purchase = state
        .store
        .create_purchase(
            &product_id,
            buyer,
            product.price,
            TransactionStatus::Completed,
        )
        .await?;

    tracing::info!(purchase_id = %purchase.id, %product_id, "purchase completed");
    success(purchase)
}

/// GET /api/purchases/:id - Look up a purchase record.
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Purchase> {
    match state.store.get_purchase(&id).await? {
        Some(purchase) => success(purchase),
        None => Err(AppError::NotFound(format!("Purchase {} not found", id))),
    }
}
