//! HTTP handlers for the Inventory & Finance API

pub mod dashboard;
pub mod expense;
pub mod health;
pub mod inventory;
pub mod product;
pub mod transfer;

pub use dashboard::*;
pub use expense::*;
pub use health::*;
pub use inventory::*;
pub use product::*;
pub use transfer::*;

use serde::Deserialize;
use shared::Period;

use crate::error::{AppError, AppResult};

/// `?mes=&ano=` period filter shared by the reporting endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(rename = "mes")]
    pub month: Option<u32>,
    #[serde(rename = "ano")]
    pub year: Option<i32>,
}

impl PeriodQuery {
    pub fn to_period(&self) -> AppResult<Period> {
        Period::new(self.month, self.year).map_err(|msg| AppError::Validation {
            field: "mes/ano".to_string(),
            message: msg.to_string(),
            message_pt: "Período inválido".to_string(),
        })
    }
}
