//! HTTP handlers for stock adjustment and stock log endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::StockMovement;

use super::PeriodQuery;
use crate::error::AppResult;
use crate::services::inventory::{AdjustStockInput, InventoryService};
use crate::store::{MovementFilter, StockUpdate};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MovementQuery {
    #[serde(rename = "mes")]
    pub month: Option<u32>,
    #[serde(rename = "ano")]
    pub year: Option<i32>,
    #[serde(rename = "produto_id")]
    pub product_id: Option<i64>,
}

/// Set a product's stock to a new quantity
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<StockUpdate>> {
    let service = InventoryService::new(state.store);
    let update = service.adjust_stock(product_id, input).await?;
    Ok(Json(update))
}

/// List stock movements, newest first
pub async fn list_movements(
    State(state): State<AppState>,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let period = PeriodQuery {
        month: query.month,
        year: query.year,
    }
    .to_period()?;

    let service = InventoryService::new(state.store);
    let movements = service
        .list_movements(&MovementFilter {
            period,
            product_id: query.product_id,
        })
        .await?;
    Ok(Json(movements))
}
