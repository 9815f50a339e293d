//! Dashboard indicator models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate sales, expenses, and balance for a period
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KpiSummary {
    pub total_sales: Decimal,
    /// Value of stock bought in (purchases and imports)
    pub stock_expenses: Decimal,
    /// Sum of recorded expenses
    pub other_expenses: Decimal,
    pub total_expenses: Decimal,
    /// Always `total_sales - total_expenses`
    pub balance: Decimal,
}
