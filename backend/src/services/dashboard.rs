//! Dashboard service deriving KPIs from the stock log and expenses

use std::sync::Arc;

use serde::Serialize;
use shared::{summarize, KpiSummary, Period};

use crate::error::AppResult;
use crate::store::{InventoryStore, MovementFilter};

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn InventoryStore>,
}

/// KPI summary together with the period it covers
#[derive(Debug, Clone, Serialize)]
pub struct DashboardKpis {
    pub period: String,
    #[serde(flatten)]
    pub summary: KpiSummary,
}

impl DashboardService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Compute sales, expenses, and balance for the period
    pub async fn get_kpis(&self, period: Period) -> AppResult<DashboardKpis> {
        let movements = self
            .store
            .list_movements(&MovementFilter {
                period,
                product_id: None,
            })
            .await?;
        let expenses = self.store.list_expenses(&period).await?;

        Ok(DashboardKpis {
            period: period.label(),
            summary: summarize(&movements, &expenses),
        })
    }
}
