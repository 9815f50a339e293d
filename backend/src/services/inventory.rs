//! Inventory service for stock adjustments and the stock log

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::StockMovement;

use crate::error::AppResult;
use crate::store::{InventoryStore, MovementFilter, StockOperation, StockUpdate};

/// Inventory service for adjusting stock and reading movements
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

/// Input for setting a product's stock to a new quantity
#[derive(Debug, Deserialize)]
pub struct AdjustStockInput {
    /// New on-hand quantity
    pub quantity: Decimal,
    pub reason: String,
    pub supplier: Option<String>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Set a product's stock, logging the difference when there is one
    pub async fn adjust_stock(&self, product_id: i64, input: AdjustStockInput) -> AppResult<StockUpdate> {
        let operation = StockOperation::SetTo {
            stock: input.quantity,
            reason: input.reason,
            supplier: input.supplier,
        };
        let update = self.store.change_stock(product_id, &operation).await?;

        match &update.movement {
            Some(movement) => tracing::info!(
                product_id,
                direction = %movement.direction,
                quantity = %movement.quantity,
                reason = %movement.reason,
                "Stock adjusted"
            ),
            None => tracing::debug!(product_id, "Stock unchanged, nothing logged"),
        }
        Ok(update)
    }

    /// List stock movements, newest first
    pub async fn list_movements(&self, filter: &MovementFilter) -> AppResult<Vec<StockMovement>> {
        self.store.list_movements(filter).await
    }
}
