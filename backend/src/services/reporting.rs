//! Reporting service for the periodic financial export

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{is_sale, is_stock_expense, summarize, Expense, Period, StockMovement};

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, MovementFilter};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: Arc<dyn InventoryStore>,
}

/// One line of the financial report
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialReportRow {
    pub date: String,
    pub category: &'static str,
    pub description: String,
    pub quantity: Option<Decimal>,
    pub amount: Decimal,
}

impl FinancialReportRow {
    fn from_movement(movement: &StockMovement, category: &'static str) -> Self {
        Self {
            date: movement.moved_at.format("%Y-%m-%d").to_string(),
            category,
            description: match &movement.supplier {
                Some(supplier) => format!("{} ({})", movement.product_name, supplier),
                None => movement.product_name.clone(),
            },
            quantity: Some(movement.quantity),
            amount: movement.value,
        }
    }

    fn from_expense(expense: &Expense) -> Self {
        Self {
            date: expense.spent_at.format("%Y-%m-%d").to_string(),
            category: "expense",
            description: expense.reason.clone(),
            quantity: None,
            amount: expense.amount,
        }
    }

    fn total(category: &'static str, period: &Period, amount: Decimal) -> Self {
        Self {
            date: String::new(),
            category,
            description: period.label(),
            quantity: None,
            amount,
        }
    }
}

impl ReportingService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Build the financial report rows for a period, oldest first, with totals last
    pub async fn financial_report(&self, period: &Period) -> AppResult<Vec<FinancialReportRow>> {
        let mut movements = self
            .store
            .list_movements(&MovementFilter {
                period: *period,
                product_id: None,
            })
            .await?;
        let mut expenses = self.store.list_expenses(period).await?;

        if movements.is_empty() && expenses.is_empty() {
            return Err(AppError::NotFound("Financial data".to_string()));
        }

        movements.reverse();
        expenses.reverse();

        let summary = summarize(&movements, &expenses);

        let mut rows: Vec<FinancialReportRow> = movements
            .iter()
            .filter_map(|m| {
                if is_sale(m) {
                    Some(FinancialReportRow::from_movement(m, "sale"))
                } else if is_stock_expense(m) {
                    Some(FinancialReportRow::from_movement(m, "stock_expense"))
                } else {
                    None
                }
            })
            .chain(expenses.iter().map(FinancialReportRow::from_expense))
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));

        rows.push(FinancialReportRow::total("total_sales", period, summary.total_sales));
        rows.push(FinancialReportRow::total("total_expenses", period, summary.total_expenses));
        rows.push(FinancialReportRow::total("balance", period, summary.balance));

        Ok(rows)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    /// Financial report for a month as CSV text
    pub async fn export_financial(&self, period: &Period) -> AppResult<String> {
        let rows = self.financial_report(period).await?;
        tracing::info!(period = %period.label(), rows = rows.len(), "Financial report exported");
        Self::export_to_csv(&rows)
    }
}
