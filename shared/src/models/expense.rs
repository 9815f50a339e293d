//! Expense models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::positive_amount;

/// An operating expense recorded by the user. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub reason: String,
    pub amount: Decimal,
    pub spent_at: DateTime<Utc>,
}

/// Input for recording an expense
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseDraft {
    #[validate(length(min = 1, max = 200))]
    pub reason: String,
    #[validate(custom = "positive_amount")]
    pub amount: Decimal,
}

impl Expense {
    pub fn record(id: i64, draft: ExpenseDraft, spent_at: DateTime<Utc>) -> Self {
        Self {
            id,
            reason: draft.reason.trim().to_string(),
            amount: draft.amount,
            spent_at,
        }
    }
}
