//! Category API endpoints.
//!
//! The category page renders a funding tab and a purchase tab; which tabs
//! exist comes from the static category table, and the listing collections
//! are narrowed through the same catalog engine as the list pages.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::catalog::{self, CategoryFilter};
use crate::errors::AppError;
use crate::models::{CategoryInfo, Product, Project, CATEGORY_TABLE};
use crate::AppState;

/// GET /api/categories - The category configuration table.
pub async fn list_categories() -> ApiResult<Vec<CategoryInfo>> {
    success(CATEGORY_TABLE.to_vec())
}

/// Query parameters for the category page.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPageQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// One category with the listing collections its tabs render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub category: CategoryInfo,
    /// Present only when the category supports funding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    /// Present only when the category supports purchase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
}

/// GET /api/categories/:id - Category page data.
///
/// An unknown id renders the not-found fallback, never a crash.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CategoryPageQuery>,
) -> ApiResult<CategoryView> {
    let info = CategoryInfo::lookup(&id)
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

    let filter = CategoryFilter::Only(info.id);
    let search = query.q.as_deref().unwrap_or("");

    let projects = if info.has_funding {
        let projects = state.store.list_projects().await?;
        Some(catalog::apply_query(projects, filter, search, None))
    } else {
        None
    };

    let products = if info.has_purchase {
        let products = state.store.list_products().await?;
        Some(catalog::apply_query(products, filter, search, None))
    } else {
        None
    };

    success(CategoryView {
        category: info.clone(),
        projects,
        products,
    })
}
