//! Expense service

use std::sync::Arc;

use shared::{Expense, ExpenseDraft, Period};
use validator::Validate;

use crate::error::AppResult;
use crate::store::InventoryStore;

#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn InventoryStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Record an expense dated now
    pub async fn create_expense(&self, draft: ExpenseDraft) -> AppResult<Expense> {
        let draft = ExpenseDraft {
            reason: draft.reason.trim().to_string(),
            ..draft
        };
        draft.validate()?;

        let expense = self.store.create_expense(draft).await?;
        tracing::info!(expense_id = expense.id, amount = %expense.amount, "Expense recorded");
        Ok(expense)
    }

    /// List expenses in the period, newest first
    pub async fn list_expenses(&self, period: &Period) -> AppResult<Vec<Expense>> {
        self.store.list_expenses(period).await
    }
}
