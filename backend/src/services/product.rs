//! Product catalogue service

use std::sync::Arc;

use shared::{Product, ProductChanges, ProductDraft};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, StockUpdate};

/// Product service for registering, editing, and deactivating products
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn InventoryStore>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// List products, active only unless `include_inactive`
    pub async fn list_products(&self, include_inactive: bool) -> AppResult<Vec<Product>> {
        self.store.list_products(include_inactive).await
    }

    /// Get a product by id
    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Register a product. Positive initial stock is logged as an inbound entry.
    pub async fn create_product(&self, draft: ProductDraft) -> AppResult<StockUpdate> {
        let draft = draft.normalized();
        draft.validate()?;

        let created = self.store.create_product(draft).await?;
        tracing::info!(
            product_id = created.product.id,
            stock = %created.product.stock,
            "Product registered"
        );
        Ok(created)
    }

    /// Update descriptive fields; `active: false` deactivates the product
    pub async fn update_product(&self, id: i64, changes: ProductChanges) -> AppResult<Product> {
        let changes = changes.normalized();
        changes.validate()?;

        let update = self.store.update_product(id, &changes).await?;
        match (changes.active, &update.movement) {
            (Some(false), Some(movement)) => tracing::info!(
                product_id = id,
                written_off = %movement.quantity,
                "Product updated and deactivated"
            ),
            (Some(false), None) => tracing::info!(product_id = id, "Product updated and deactivated"),
            _ => tracing::info!(product_id = id, "Product updated"),
        }
        Ok(update.product)
    }

    /// Soft-delete a product, writing off whatever stock remains
    pub async fn deactivate_product(&self, id: i64) -> AppResult<StockUpdate> {
        let update = self.store.deactivate_product(id).await?;
        match &update.movement {
            Some(movement) => tracing::info!(
                product_id = id,
                written_off = %movement.quantity,
                "Product deactivated"
            ),
            None => tracing::info!(product_id = id, "Product deactivated"),
        }
        Ok(update)
    }
}
