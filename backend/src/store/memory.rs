//! In-process record store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{
    ledger, Expense, ExpenseDraft, Period, Product, ProductChanges, ProductDraft, StockMovement,
};
use tokio::sync::RwLock;

use super::{InventoryStore, MovementFilter, StockOperation, StockUpdate};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    movements: Vec<StockMovement>,
    expenses: Vec<Expense>,
    last_product_id: i64,
    last_movement_id: i64,
    last_expense_id: i64,
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

impl Tables {
    fn product_index(&self, id: i64) -> AppResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Write off remaining stock and clear the active flag; no-op when inactive
    fn deactivate(&mut self, index: usize, at: DateTime<Utc>) -> Option<StockMovement> {
        let current = &self.products[index];
        if !current.active {
            return None;
        }

        let change = ledger::write_off(current, at);
        let movement = self.append(change.entry);
        let product = &mut self.products[index];
        product.stock = change.new_stock;
        product.active = false;
        movement
    }

    fn append(&mut self, entry: Option<shared::NewStockMovement>) -> Option<StockMovement> {
        let entry = entry?;
        let movement = entry.into_movement(next_id(&mut self.last_movement_id));
        self.movements.push(movement.clone());
        Some(movement)
    }
}

/// Record store kept entirely in memory.
///
/// All tables sit behind one lock, so a stock update and its log entry are
/// always written together.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_products(&self, include_inactive: bool) -> AppResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .filter(|p| include_inactive || p.active)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: i64) -> AppResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_active_product_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let needle = name.trim().to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .find(|p| p.active && p.name.to_lowercase() == needle)
            .cloned())
    }

    async fn create_product(&self, draft: ProductDraft) -> AppResult<StockUpdate> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;

        let product = Product::register(next_id(&mut tables.last_product_id), draft, now);
        tables.products.push(product.clone());
        let movement = tables.append(ledger::initial_entry(&product, now));

        Ok(StockUpdate { product, movement })
    }

    async fn update_product(&self, id: i64, changes: &ProductChanges) -> AppResult<StockUpdate> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        let index = tables.product_index(id)?;

        changes.apply(&mut tables.products[index]);
        let movement = match changes.active {
            Some(false) => tables.deactivate(index, now),
            Some(true) => {
                tables.products[index].active = true;
                None
            }
            None => None,
        };

        Ok(StockUpdate {
            product: tables.products[index].clone(),
            movement,
        })
    }

    async fn change_stock(&self, id: i64, operation: &StockOperation) -> AppResult<StockUpdate> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        let index = tables.product_index(id)?;

        let change = operation.plan(&tables.products[index], now)?;
        let movement = tables.append(change.entry);
        let product = &mut tables.products[index];
        product.stock = change.new_stock;

        Ok(StockUpdate {
            product: product.clone(),
            movement,
        })
    }

    async fn list_movements(&self, filter: &MovementFilter) -> AppResult<Vec<StockMovement>> {
        let tables = self.tables.read().await;
        let mut movements: Vec<_> = tables
            .movements
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        movements.sort_by(|a, b| b.moved_at.cmp(&a.moved_at).then(b.id.cmp(&a.id)));
        Ok(movements)
    }

    async fn create_expense(&self, draft: ExpenseDraft) -> AppResult<Expense> {
        let mut tables = self.tables.write().await;
        let expense = Expense::record(next_id(&mut tables.last_expense_id), draft, Utc::now());
        tables.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn list_expenses(&self, period: &Period) -> AppResult<Vec<Expense>> {
        let tables = self.tables.read().await;
        let mut expenses: Vec<_> = tables
            .expenses
            .iter()
            .filter(|e| period.contains(&e.spent_at))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.spent_at.cmp(&a.spent_at).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }
}
