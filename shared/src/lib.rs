//! Shared types and models for the Inventory & Finance platform
//!
//! This crate contains the domain records and the pure bookkeeping rules
//! shared between the backend, the browser front end (via WASM), and tests.

pub mod kpi;
pub mod ledger;
pub mod models;
pub mod types;
pub mod validation;

pub use kpi::*;
pub use ledger::*;
pub use models::*;
pub use types::*;
pub use validation::*;
