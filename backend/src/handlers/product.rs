//! HTTP handlers for product endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::product::{ProductService, ProductWithStock};
use crate::AppState;
use shared::{CreateProductInput, Page, PageParams, UpdateProductInput};

/// Query parameters for the paged product listing.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// List products with computed stock, paged and optionally filtered
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<Json<Page<ProductWithStock>>> {
    let service = ProductService::new(state.db);
    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };
    let page = service.list(query.q.as_deref(), params).await?;
    Ok(Json(page))
}

/// Create a product; its code is generated server-side
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<ProductWithStock>> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok(Json(product))
}

/// Edit a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<ProductWithStock>> {
    let service = ProductService::new(state.db);
    let product = service.update(product_id, input).await?;
    Ok(Json(product))
}

/// Delete a product, guarded against existing note items
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<DeletedResponse>> {
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(Json(DeletedResponse {
        deleted_id: product_id,
    }))
}
