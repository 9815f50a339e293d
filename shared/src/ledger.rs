//! Stock bookkeeping rules
//!
//! Every quantity change goes through one of these functions, which return
//! the new stock level and the log entry (if any) that must be persisted
//! together with it. Valuation policy:
//!
//! - initial registration and deactivation write-off entries carry no value
//! - adjustments and imports are valued at `quantity × sale_price`
//!
//! Quantities carry at most three decimal places and values are rounded
//! half away from zero to two, matching the `NUMERIC` columns.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::{reason, MovementDirection, NewStockMovement, Product};
use crate::validation::{fits_scale, validate_reason, MONEY_DP, QUANTITY_DP};

/// Reasons a stock change is refused
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Stock quantity cannot be negative")]
    NegativeStock,

    #[error("Movement quantity must be positive")]
    NonPositiveQuantity,

    #[error("Quantity must have at most 3 decimal places")]
    ExcessPrecision,

    #[error("{0}")]
    InvalidReason(&'static str),

    #[error("Product {0} is inactive")]
    InactiveProduct(i64),

    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: Decimal,
        requested: Decimal,
    },
}

/// Outcome of a stock change: the quantity to store and the entry to append
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub new_stock: Decimal,
    pub entry: Option<NewStockMovement>,
}

/// Monetary value of moving `quantity` units at `unit_price`
pub fn movement_value(quantity: Decimal, unit_price: Decimal) -> Decimal {
    (quantity.abs() * unit_price).round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

fn entry(
    product: &Product,
    direction: MovementDirection,
    quantity: Decimal,
    reason: &str,
    value: Decimal,
    supplier: Option<String>,
    at: DateTime<Utc>,
) -> NewStockMovement {
    NewStockMovement {
        product_id: product.id,
        product_name: product.name.clone(),
        moved_at: at,
        quantity,
        direction,
        reason: reason.trim().to_string(),
        value,
        supplier: supplier
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    }
}

/// Inbound entry for a product registered with stock on hand
pub fn initial_entry(product: &Product, at: DateTime<Utc>) -> Option<NewStockMovement> {
    if product.stock <= Decimal::ZERO {
        return None;
    }
    Some(entry(
        product,
        MovementDirection::In,
        product.stock,
        reason::INITIAL_REGISTRATION,
        Decimal::ZERO,
        None,
        at,
    ))
}

/// Deactivation zeroes the stock, writing off whatever was on hand
pub fn write_off(product: &Product, at: DateTime<Utc>) -> StockChange {
    let entry = (product.stock > Decimal::ZERO).then(|| {
        entry(
            product,
            MovementDirection::Out,
            product.stock,
            reason::DEACTIVATION_WRITE_OFF,
            Decimal::ZERO,
            None,
            at,
        )
    });
    StockChange {
        new_stock: Decimal::ZERO,
        entry,
    }
}

/// Set a product's stock to `new_stock`, logging the signed difference.
///
/// Setting the stock to its current value is accepted and logs nothing.
pub fn adjust(
    product: &Product,
    new_stock: Decimal,
    reason: &str,
    supplier: Option<String>,
    at: DateTime<Utc>,
) -> Result<StockChange, LedgerError> {
    if !product.active {
        return Err(LedgerError::InactiveProduct(product.id));
    }
    if new_stock < Decimal::ZERO {
        return Err(LedgerError::NegativeStock);
    }
    if !fits_scale(&new_stock, QUANTITY_DP) {
        return Err(LedgerError::ExcessPrecision);
    }
    validate_reason(reason).map_err(LedgerError::InvalidReason)?;

    let delta = new_stock - product.stock;
    let entry = (!delta.is_zero()).then(|| {
        let direction = if delta > Decimal::ZERO {
            MovementDirection::In
        } else {
            MovementDirection::Out
        };
        entry(
            product,
            direction,
            delta.abs(),
            reason,
            movement_value(delta, product.sale_price),
            supplier,
            at,
        )
    });

    Ok(StockChange { new_stock, entry })
}

/// Move `quantity` units in or out of a product's stock
pub fn apply_movement(
    product: &Product,
    direction: MovementDirection,
    quantity: Decimal,
    reason: &str,
    supplier: Option<String>,
    at: DateTime<Utc>,
) -> Result<StockChange, LedgerError> {
    if quantity <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveQuantity);
    }
    if !fits_scale(&quantity, QUANTITY_DP) {
        return Err(LedgerError::ExcessPrecision);
    }
    let new_stock = match direction {
        MovementDirection::In => product.stock + quantity,
        MovementDirection::Out => {
            if quantity > product.stock {
                return Err(LedgerError::InsufficientStock {
                    product_id: product.id,
                    available: product.stock,
                    requested: quantity,
                });
            }
            product.stock - quantity
        }
    };
    adjust(product, new_stock, reason, supplier, at)
}
