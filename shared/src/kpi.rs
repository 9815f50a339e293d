//! Dashboard indicator aggregation

use rust_decimal::Decimal;

use crate::models::{reason, Expense, KpiSummary, MovementDirection, StockMovement};
use crate::types::Period;

/// Outbound movements recorded as sales ("sale" / "venda") count as revenue
pub fn is_sale(movement: &StockMovement) -> bool {
    movement.direction == MovementDirection::Out && reason::is_sale(&movement.reason)
}

/// Inbound purchases and imports count as stock expenses, in English or Portuguese
pub fn is_stock_expense(movement: &StockMovement) -> bool {
    movement.direction == MovementDirection::In
        && (reason::is_purchase(&movement.reason) || reason::is_import(&movement.reason))
}

/// Sum sales and expenses over the given records
pub fn summarize<'a, M, E>(movements: M, expenses: E) -> KpiSummary
where
    M: IntoIterator<Item = &'a StockMovement>,
    E: IntoIterator<Item = &'a Expense>,
{
    let mut summary = KpiSummary::default();

    for movement in movements {
        if is_sale(movement) {
            summary.total_sales += movement.value;
        } else if is_stock_expense(movement) {
            summary.stock_expenses += movement.value;
        }
    }

    summary.other_expenses = expenses.into_iter().map(|e| e.amount).sum::<Decimal>();
    summary.total_expenses = summary.stock_expenses + summary.other_expenses;
    summary.balance = summary.total_sales - summary.total_expenses;
    summary
}

/// Sum sales and expenses for the records that fall inside `period`
pub fn summarize_period(
    movements: &[StockMovement],
    expenses: &[Expense],
    period: &Period,
) -> KpiSummary {
    summarize(
        movements.iter().filter(|m| period.contains(&m.moved_at)),
        expenses.iter().filter(|e| period.contains(&e.spent_at)),
    )
}
