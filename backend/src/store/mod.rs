//! Record stores backing the services
//!
//! Two interchangeable implementations sit behind [`InventoryStore`]: an
//! in-process [`MemoryStore`] and a PostgreSQL-backed [`PgStore`]. Each
//! stock-changing operation applies the quantity update and its log entry
//! atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    ledger, Expense, ExpenseDraft, LedgerError, MovementDirection, Period, Product,
    ProductChanges, ProductDraft, StockChange, StockMovement,
};

use crate::error::AppResult;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A stock change requested by a caller
#[derive(Debug, Clone)]
pub enum StockOperation {
    /// Set the stock to an absolute quantity
    SetTo {
        stock: Decimal,
        reason: String,
        supplier: Option<String>,
    },
    /// Move a quantity in or out
    Move {
        direction: MovementDirection,
        quantity: Decimal,
        reason: String,
        supplier: Option<String>,
    },
}

impl StockOperation {
    /// Compute the resulting stock and log entry for `product`
    pub fn plan(&self, product: &Product, at: DateTime<Utc>) -> Result<StockChange, LedgerError> {
        match self {
            StockOperation::SetTo {
                stock,
                reason,
                supplier,
            } => ledger::adjust(product, *stock, reason, supplier.clone(), at),
            StockOperation::Move {
                direction,
                quantity,
                reason,
                supplier,
            } => ledger::apply_movement(product, *direction, *quantity, reason, supplier.clone(), at),
        }
    }
}

/// A product after a stock-changing operation, with the entry it produced
#[derive(Debug, Clone, Serialize)]
pub struct StockUpdate {
    pub product: Product,
    pub movement: Option<StockMovement>,
}

/// Filter for stock log queries
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub period: Period,
    pub product_id: Option<i64>,
}

impl MovementFilter {
    pub fn matches(&self, movement: &StockMovement) -> bool {
        self.period.contains(&movement.moved_at)
            && self.product_id.map_or(true, |id| movement.product_id == id)
    }
}

/// Data-access seam shared by the in-memory and PostgreSQL stores
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Short name reported by the health endpoint
    fn backend_tag(&self) -> &'static str;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Products ordered by id; inactive ones only when asked for
    async fn list_products(&self, include_inactive: bool) -> AppResult<Vec<Product>>;

    async fn get_product(&self, id: i64) -> AppResult<Option<Product>>;

    /// Case-insensitive exact name match among active products
    async fn find_active_product_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    /// Register a product, logging its initial stock when positive
    async fn create_product(&self, draft: ProductDraft) -> AppResult<StockUpdate>;

    /// Apply descriptive changes in one step. `active: Some(false)` also
    /// writes off remaining stock; `Some(true)` reactivates.
    async fn update_product(&self, id: i64, changes: &ProductChanges) -> AppResult<StockUpdate>;

    /// Soft-delete: write off remaining stock and clear the active flag
    async fn deactivate_product(&self, id: i64) -> AppResult<StockUpdate> {
        let changes = ProductChanges {
            active: Some(false),
            ..Default::default()
        };
        self.update_product(id, &changes).await
    }

    /// Apply a stock operation and append its log entry in one step
    async fn change_stock(&self, id: i64, operation: &StockOperation) -> AppResult<StockUpdate>;

    /// Movements newest first
    async fn list_movements(&self, filter: &MovementFilter) -> AppResult<Vec<StockMovement>>;

    async fn create_expense(&self, draft: ExpenseDraft) -> AppResult<Expense>;

    /// Expenses newest first
    async fn list_expenses(&self, period: &Period) -> AppResult<Vec<Expense>>;
}
