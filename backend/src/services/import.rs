//! Spreadsheet stock import
//!
//! Expected layout, one header row followed by data rows:
//!
//! | product (id or name) | quantity | direction | supplier (optional) |
//!
//! Rows that cannot be applied are skipped and reported; the import never
//! aborts because of a single bad row.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{reason, MovementDirection, Product};

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, StockOperation};

#[derive(Clone)]
pub struct ImportService {
    store: Arc<dyn InventoryStore>,
}

/// A row that was not applied, with the 1-based file line it starts on
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Data rows read, header excluded
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

/// A data row with its required fields parsed
#[derive(Debug, Clone, PartialEq)]
struct ImportRow {
    product_ref: String,
    quantity: Decimal,
    direction: MovementDirection,
    supplier: Option<String>,
}

/// Excel exports in comma-decimal locales use `;` between fields
fn detect_delimiter(data: &[u8]) -> u8 {
    let first_line = data.split(|b| *b == b'\n').next().unwrap_or_default();
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn parse_quantity(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .ok()
        .filter(|q| *q > Decimal::ZERO)
}

fn parse_row(record: &csv::StringRecord) -> Result<ImportRow, String> {
    let field = |i: usize| record.get(i).map(str::trim).unwrap_or_default();

    let product_ref = field(0);
    if product_ref.is_empty() {
        return Err("missing product".to_string());
    }
    let quantity = parse_quantity(field(1))
        .ok_or_else(|| format!("invalid quantity '{}'", field(1)))?;
    let direction = MovementDirection::from_keyword(field(2))
        .ok_or_else(|| format!("unknown direction '{}'", field(2)))?;
    let supplier = Some(field(3)).filter(|s| !s.is_empty()).map(str::to_string);

    Ok(ImportRow {
        product_ref: product_ref.to_string(),
        quantity,
        direction,
        supplier,
    })
}

impl ImportService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Resolve a product by numeric id, falling back to its name
    async fn resolve_product(&self, product_ref: &str) -> AppResult<Option<Product>> {
        if let Ok(id) = product_ref.parse::<i64>() {
            if let Some(product) = self.store.get_product(id).await? {
                return Ok(Some(product));
            }
        }
        self.store.find_active_product_by_name(product_ref).await
    }

    /// Apply every usable row of a CSV spreadsheet to the stock
    pub async fn import_stock(&self, data: &[u8]) -> AppResult<ImportReport> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadUpload("the file is empty".to_string()));
        }
        // Excel workbooks and other binary uploads are not UTF-8 text
        if std::str::from_utf8(data).is_err() {
            return Err(AppError::BadUpload(
                "the file is not a UTF-8 CSV spreadsheet".to_string(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(detect_delimiter(data))
            .from_reader(data);

        let mut report = ImportReport::default();

        for (index, result) in reader.records().enumerate() {
            report.total_rows += 1;
            // Quoted fields may span lines; fall back to one line per record
            let position = match &result {
                Ok(record) => record.position(),
                Err(e) => e.position(),
            };
            let line = position.map_or(index as u64 + 2, |p| p.line());

            let skip = |report: &mut ImportReport, reason: String| {
                tracing::warn!(line, %reason, "Skipping import row");
                report.skipped.push(SkippedRow { line, reason });
            };

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    skip(&mut report, format!("unreadable row: {}", e));
                    continue;
                }
            };

            let row = match parse_row(&record) {
                Ok(row) => row,
                Err(reason) => {
                    skip(&mut report, reason);
                    continue;
                }
            };

            let product = match self.resolve_product(&row.product_ref).await? {
                Some(product) => product,
                None => {
                    skip(&mut report, format!("product '{}' not found", row.product_ref));
                    continue;
                }
            };

            let operation = StockOperation::Move {
                direction: row.direction,
                quantity: row.quantity,
                reason: reason::IMPORT.to_string(),
                supplier: row.supplier,
            };

            match self.store.change_stock(product.id, &operation).await {
                Ok(_) => report.imported += 1,
                Err(e) if e.is_client_error() => skip(&mut report, e.to_string()),
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            total_rows = report.total_rows,
            imported = report.imported,
            skipped = report.skipped.len(),
            "Stock import finished"
        );
        Ok(report)
    }
}
