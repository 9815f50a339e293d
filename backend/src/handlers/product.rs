//! HTTP handlers for product endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{Product, ProductChanges, ProductDraft};

use crate::error::AppResult;
use crate::services::ProductService;
use crate::store::StockUpdate;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// List products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.store);
    let products = service.list_products(query.include_inactive).await?;
    Ok(Json(products))
}

/// Get a product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.store);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Register a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductDraft>,
) -> AppResult<(StatusCode, Json<StockUpdate>)> {
    let service = ProductService::new(state.store);
    let created = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a product's descriptive fields
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(input): Json<ProductChanges>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.store);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

/// Deactivate (soft-delete) a product
pub async fn deactivate_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<StockUpdate>> {
    let service = ProductService::new(state.store);
    let update = service.deactivate_product(product_id).await?;
    Ok(Json(update))
}
