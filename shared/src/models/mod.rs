//! Domain models for the Inventory & Finance platform

mod expense;
mod kpi;
mod product;
mod stock;

pub use expense::*;
pub use kpi::*;
pub use product::*;
pub use stock::*;
