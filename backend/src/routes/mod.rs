//! Route definitions for the Inventory & Finance API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Products
        .nest("/produtos", product_routes())
        // Stock log
        .route("/logs/estoque", get(handlers::list_movements))
        // Expenses
        .route(
            "/despesas",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        // Dashboard
        .route("/dashboard/kpis", get(handlers::get_kpis))
        // Spreadsheet import/export
        .route(
            "/importar-estoque",
            post(handlers::import_stock).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/exportar/financeiro", get(handlers::export_financial))
}

/// Product management routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::deactivate_product),
        )
        .route("/:product_id/estoque", post(handlers::adjust_stock))
}
