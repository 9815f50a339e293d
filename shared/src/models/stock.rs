//! Stock movement (log) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    In,
    Out,
}

impl MovementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::In => "in",
            MovementDirection::Out => "out",
        }
    }

    /// Parse a spreadsheet direction keyword, case-insensitively.
    ///
    /// Accepts `in`/`inbound`/`entrada` and `out`/`outbound`/`saida`/`saída`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "in" | "inbound" | "entrada" => Some(MovementDirection::In),
            "out" | "outbound" | "saida" | "saída" => Some(MovementDirection::Out),
            _ => None,
        }
    }
}

impl std::fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(MovementDirection::In),
            "out" => Ok(MovementDirection::Out),
            other => Err(format!("unknown movement direction: {}", other)),
        }
    }
}

/// Well-known movement reasons
pub mod reason {
    pub const INITIAL_REGISTRATION: &str = "initial registration";
    pub const DEACTIVATION_WRITE_OFF: &str = "deactivation write-off";
    pub const SALE: &str = "sale";
    pub const PURCHASE: &str = "purchase";
    pub const IMPORT: &str = "import";

    // Portuguese spellings used by the front end
    const SALE_ALIASES: &[&str] = &[SALE, "venda"];
    const PURCHASE_ALIASES: &[&str] = &[PURCHASE, "compra"];
    const IMPORT_ALIASES: &[&str] = &[IMPORT, "importação", "importacao"];

    /// Case-insensitive match against a list of spellings, Unicode-aware
    fn matches_any(reason: &str, aliases: &[&str]) -> bool {
        let reason = reason.trim().to_lowercase();
        aliases.iter().any(|alias| reason == *alias)
    }

    pub fn is_sale(reason: &str) -> bool {
        matches_any(reason, SALE_ALIASES)
    }

    pub fn is_purchase(reason: &str) -> bool {
        matches_any(reason, PURCHASE_ALIASES)
    }

    pub fn is_import(reason: &str) -> bool {
        matches_any(reason, IMPORT_ALIASES)
    }

}

/// A recorded change in a product's on-hand quantity. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockMovement {
    pub id: i64,
    pub product_id: i64,
    /// Product name at the time of the movement
    pub product_name: String,
    pub moved_at: DateTime<Utc>,
    pub quantity: Decimal,
    pub direction: MovementDirection,
    pub reason: String,
    /// Monetary value of the movement
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// A movement that has been computed but not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockMovement {
    pub product_id: i64,
    pub product_name: String,
    pub moved_at: DateTime<Utc>,
    pub quantity: Decimal,
    pub direction: MovementDirection,
    pub reason: String,
    pub value: Decimal,
    pub supplier: Option<String>,
}

impl NewStockMovement {
    pub fn into_movement(self, id: i64) -> StockMovement {
        StockMovement {
            id,
            product_id: self.product_id,
            product_name: self.product_name,
            moved_at: self.moved_at,
            quantity: self.quantity,
            direction: self.direction,
            reason: self.reason,
            value: self.value,
            supplier: self.supplier,
        }
    }
}
