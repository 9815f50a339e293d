//! Product catalogue models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{non_negative_amount, non_negative_quantity};

/// A stocked, sellable item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Free-form category, e.g. "beverage" or "cleaning"
    pub category: String,
    /// Unit of measure, e.g. "un", "kg", "l"
    pub unit: String,
    pub stock: Decimal,
    pub sale_price: Decimal,
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

/// Input for registering a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 60))]
    pub category: String,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    /// Initial stock on hand
    #[serde(default)]
    #[validate(custom = "non_negative_quantity")]
    pub stock: Decimal,
    #[validate(custom = "non_negative_amount")]
    pub sale_price: Decimal,
}

impl ProductDraft {
    /// Trim the free-text fields in place
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.category = self.category.trim().to_string();
        self.unit = self.unit.trim().to_string();
        self
    }
}

/// Partial update of a product's descriptive fields.
///
/// Stock is not editable here. Quantities only change through
/// logged adjustments, imports, and deactivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductChanges {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 60))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub unit: Option<String>,
    #[validate(custom = "non_negative_amount")]
    pub sale_price: Option<Decimal>,
    /// `Some(false)` requests deactivation
    pub active: Option<bool>,
}

fn trimmed(field: Option<String>) -> Option<String> {
    field.map(|value| value.trim().to_string())
}

impl ProductChanges {
    /// Trim the free-text fields so blank values fail validation
    pub fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            category: trimmed(self.category),
            unit: trimmed(self.unit),
            ..self
        }
    }

    /// True when no descriptive field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.unit.is_none()
            && self.sale_price.is_none()
    }

    /// Apply descriptive changes to a product. `active` is handled by the caller.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = &self.category {
            product.category = category.trim().to_string();
        }
        if let Some(unit) = &self.unit {
            product.unit = unit.trim().to_string();
        }
        if let Some(price) = self.sale_price {
            product.sale_price = price;
        }
    }
}

impl Product {
    /// Build a freshly registered, active product from a draft
    pub fn register(id: i64, draft: ProductDraft, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            unit: draft.unit,
            stock: draft.stock,
            sale_price: draft.sale_price,
            registered_at,
            active: true,
        }
    }
}
