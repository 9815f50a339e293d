//! Validation utilities for the Inventory & Finance platform
//!
//! Field-level rules are attached to the draft models with `validator`
//! derives; the helpers here are the custom rules and the plain checks used
//! outside of a derive.

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

// ============================================================================
// Custom field validators
// ============================================================================

/// Decimal places kept for stock quantities
pub const QUANTITY_DP: u32 = 3;

/// Decimal places kept for prices and monetary values
pub const MONEY_DP: u32 = 2;

/// Whether `value` needs no more than `dp` decimal places
pub fn fits_scale(value: &Decimal, dp: u32) -> bool {
    value.normalize().scale() <= dp
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Stock quantities may be zero but never negative, with at most three decimals
pub fn non_negative_quantity(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(field_error("non_negative", "must not be negative"));
    }
    if !fits_scale(value, QUANTITY_DP) {
        return Err(field_error("scale", "must have at most 3 decimal places"));
    }
    Ok(())
}

/// Prices may be zero but never negative, with at most two decimals
pub fn non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(field_error("non_negative", "must not be negative"));
    }
    if !fits_scale(value, MONEY_DP) {
        return Err(field_error("scale", "must have at most 2 decimal places"));
    }
    Ok(())
}

/// Expense amounts must be strictly positive, with at most two decimals
pub fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(field_error("positive", "must be positive"));
    }
    if !fits_scale(value, MONEY_DP) {
        return Err(field_error("scale", "must have at most 2 decimal places"));
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a free-text movement reason
pub fn validate_reason(reason: &str) -> Result<(), &'static str> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err("Reason must not be blank");
    }
    if trimmed.chars().count() > 200 {
        return Err("Reason must be at most 200 characters");
    }
    Ok(())
}

pub fn validate_month(month: u32) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), &'static str> {
    if !(2000..=2100).contains(&year) {
        return Err("Year must be between 2000 and 2100");
    }
    Ok(())
}

/// Flatten `validator` errors into the first offending field and a message.
///
/// Fields are visited in name order so the result is stable.
pub fn first_field_error(errors: &ValidationErrors) -> Option<(String, String)> {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    let field = fields.into_iter().next()?;
    let err = field_errors.get(field)?.first()?;
    let message = match &err.message {
        Some(msg) => format!("{} {}", field, msg),
        None => format!("{} is invalid ({})", field, err.code),
    };
    Some((field.to_string(), message))
}
