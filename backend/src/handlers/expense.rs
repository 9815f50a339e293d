//! HTTP handlers for expense endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use shared::{Expense, ExpenseDraft};

use super::PeriodQuery;
use crate::error::AppResult;
use crate::services::ExpenseService;
use crate::AppState;

/// Record an expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<ExpenseDraft>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    let service = ExpenseService::new(state.store);
    let expense = service.create_expense(input).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// List expenses, newest first
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<Expense>>> {
    let period = query.to_period()?;
    let service = ExpenseService::new(state.store);
    let expenses = service.list_expenses(&period).await?;
    Ok(Json(expenses))
}
