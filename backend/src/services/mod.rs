//! Business logic services for the Inventory & Finance backend

pub mod dashboard;
pub mod expense;
pub mod import;
pub mod inventory;
pub mod product;
pub mod reporting;

pub use dashboard::DashboardService;
pub use expense::ExpenseService;
pub use import::ImportService;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use reporting::ReportingService;
