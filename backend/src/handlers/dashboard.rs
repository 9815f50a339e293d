//! Dashboard handlers

use axum::{
    extract::{Query, State},
    Json,
};

use super::PeriodQuery;
use crate::error::AppResult;
use crate::services::dashboard::{DashboardKpis, DashboardService};
use crate::AppState;

/// Get sales, expenses, and balance for a period
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<DashboardKpis>> {
    let period = query.to_period()?;
    let service = DashboardService::new(state.store);
    let kpis = service.get_kpis(period).await?;
    Ok(Json(kpis))
}
