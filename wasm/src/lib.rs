//! WebAssembly module for the Inventory & Finance platform
//!
//! Provides client-side computation for:
//! - Stock adjustment previews
//! - KPI summaries over already-fetched records
//! - Offline validation of product and expense forms
//!
//! Quantities and amounts cross the boundary as decimal strings so no
//! precision is lost to `f64`.

use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// What an adjustment would log, as shown before submitting the form
#[derive(Debug, Serialize, PartialEq)]
pub struct AdjustmentPreview {
    pub direction: Option<MovementDirection>,
    pub quantity: Decimal,
    pub value: Decimal,
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim()).map_err(|_| format!("{} is not a number: '{}'", field, raw))
}

fn preview(current: &str, new: &str, sale_price: &str, reason: &str) -> Result<AdjustmentPreview, String> {
    let product = Product {
        id: 0,
        name: String::new(),
        category: String::new(),
        unit: String::new(),
        stock: parse_decimal("current stock", current)?,
        sale_price: parse_decimal("sale price", sale_price)?,
        registered_at: Utc::now(),
        active: true,
    };
    let new_stock = parse_decimal("new stock", new)?;
    let change = shared::adjust(&product, new_stock, reason, None, Utc::now()).map_err(|e| e.to_string())?;

    Ok(match change.entry {
        Some(entry) => AdjustmentPreview {
            direction: Some(entry.direction),
            quantity: entry.quantity,
            value: entry.value,
        },
        None => AdjustmentPreview {
            direction: None,
            quantity: Decimal::ZERO,
            value: Decimal::ZERO,
        },
    })
}

fn kpis(movements_json: &str, expenses_json: &str) -> Result<KpiSummary, String> {
    let movements: Vec<StockMovement> =
        serde_json::from_str(movements_json).map_err(|e| format!("Invalid movements JSON: {}", e))?;
    let expenses: Vec<Expense> =
        serde_json::from_str(expenses_json).map_err(|e| format!("Invalid expenses JSON: {}", e))?;
    Ok(shared::summarize(&movements, &expenses))
}

fn check_draft<T: Validate + serde::de::DeserializeOwned>(json: &str) -> Result<(), String> {
    let draft: T = serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {}", e))?;
    draft.validate().map_err(|errors| {
        first_field_error(&errors)
            .map(|(_, message)| message)
            .unwrap_or_else(|| errors.to_string())
    })
}

/// Preview the log entry a stock adjustment would produce, as JSON
#[wasm_bindgen]
pub fn preview_adjustment(
    current_stock: &str,
    new_stock: &str,
    sale_price: &str,
    reason: &str,
) -> Result<String, JsValue> {
    let preview = preview(current_stock, new_stock, sale_price, reason).map_err(|e| JsValue::from_str(&e))?;
    serde_json::to_string(&preview).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Summarize KPIs over movements and expenses given as JSON arrays
#[wasm_bindgen]
pub fn summarize_kpis(movements_json: &str, expenses_json: &str) -> Result<String, JsValue> {
    let summary = kpis(movements_json, expenses_json).map_err(|e| JsValue::from_str(&e))?;
    serde_json::to_string(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Normalize a spreadsheet direction keyword to "in" / "out"
#[wasm_bindgen]
pub fn parse_direction_keyword(keyword: &str) -> Option<String> {
    MovementDirection::from_keyword(keyword).map(|d| d.as_str().to_string())
}

/// Monetary value of moving `quantity` units at `unit_price`
#[wasm_bindgen]
pub fn calculate_movement_value(quantity: &str, unit_price: &str) -> Option<String> {
    let quantity = Decimal::from_str(quantity.trim()).ok()?;
    let unit_price = Decimal::from_str(unit_price.trim()).ok()?;
    Some(shared::movement_value(quantity, unit_price).to_string())
}

/// Validate a product form; the error names the first invalid field
#[wasm_bindgen]
pub fn validate_product_form(draft_json: &str) -> Result<(), JsValue> {
    check_draft::<ProductDraft>(draft_json).map_err(|e| JsValue::from_str(&e))
}

/// Validate an expense form; the error names the first invalid field
#[wasm_bindgen]
pub fn validate_expense_form(draft_json: &str) -> Result<(), JsValue> {
    check_draft::<ExpenseDraft>(draft_json).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_outbound_sale() {
        let p = preview("10", "6", "2.50", "sale").unwrap();
        assert_eq!(p.direction, Some(MovementDirection::Out));
        assert_eq!(p.quantity, Decimal::from(4));
        assert_eq!(p.value, Decimal::from(10));
    }

    #[test]
    fn test_preview_no_change() {
        let p = preview("10", "10", "2.50", "recount").unwrap();
        assert_eq!(p.direction, None);
        assert_eq!(p.quantity, Decimal::ZERO);
    }

    #[test]
    fn test_preview_rejects_bad_input() {
        assert!(preview("ten", "6", "2.50", "sale").is_err());
        assert!(preview("10", "-1", "2.50", "sale").is_err());
        assert!(preview("10", "6", "2.50", " ").is_err());
    }

    #[test]
    fn test_kpis_from_json() {
        let movements = r#"[{
            "id": 1, "product_id": 1, "product_name": "Soap",
            "moved_at": "2024-03-01T10:00:00Z", "quantity": "2",
            "direction": "out", "reason": "sale", "value": "7.00"
        }]"#;
        let expenses = r#"[{"id": 1, "reason": "Rent", "amount": "5.00", "spent_at": "2024-03-02T10:00:00Z"}]"#;
        let summary = kpis(movements, expenses).unwrap();
        assert_eq!(summary.total_sales, Decimal::from(7));
        assert_eq!(summary.balance, Decimal::from(2));
    }

    #[test]
    fn test_direction_keywords() {
        assert_eq!(parse_direction_keyword("ENTRADA").as_deref(), Some("in"));
        assert_eq!(parse_direction_keyword("saída").as_deref(), Some("out"));
        assert_eq!(parse_direction_keyword("both"), None);
    }

    #[test]
    fn test_movement_value() {
        assert_eq!(calculate_movement_value("3", "1.50").as_deref(), Some("4.50"));
        assert_eq!(calculate_movement_value("x", "1.50"), None);
    }

    #[test]
    fn test_check_product_draft() {
        let ok = r#"{"name": "Soap", "category": "cleaning", "unit": "un", "stock": "3", "sale_price": "3.50"}"#;
        assert!(check_draft::<ProductDraft>(ok).is_ok());

        let bad = r#"{"name": "Soap", "category": "cleaning", "unit": "un", "stock": "-3", "sale_price": "3.50"}"#;
        assert_eq!(check_draft::<ProductDraft>(bad).unwrap_err(), "stock must not be negative");
    }
}
