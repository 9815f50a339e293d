//! Spreadsheet import tests
//!
//! Tests for the stock import including:
//! - Products resolved by id or by name
//! - Bad rows skipped without aborting the import
//! - Outbound rows never driving stock negative
//! - Semicolon-delimited, comma-decimal files

use std::str::FromStr;
use std::sync::Arc;

use inventory_finance_backend::services::{ImportService, ProductService};
use inventory_finance_backend::store::MovementFilter;
use inventory_finance_backend::{AppError, InventoryStore, MemoryStore};
use rust_decimal::Decimal;
use shared::{reason, MovementDirection, ProductDraft};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn setup() -> (Arc<dyn InventoryStore>, ImportService) {
    let store: Arc<dyn InventoryStore> = Arc::new(MemoryStore::new());
    let products = ProductService::new(store.clone());
    for (name, stock, price) in [("Rice", "10", "6"), ("Beans", "0", "8.50")] {
        products
            .create_product(ProductDraft {
                name: name.to_string(),
                category: "grocery".to_string(),
                unit: "kg".to_string(),
                stock: dec(stock),
                sale_price: dec(price),
            })
            .await
            .unwrap();
    }
    let service = ImportService::new(store.clone());
    (store, service)
}

async fn stock_of(store: &Arc<dyn InventoryStore>, id: i64) -> Decimal {
    store.get_product(id).await.unwrap().unwrap().stock
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_import_by_name_and_id() {
        let (store, service) = setup().await;
        let csv = "product,quantity,direction,supplier\n\
                   rice,5,in,Acme\n\
                   2,3,entrada,\n\
                   Rice,4,out,\n";

        let report = service.import_stock(csv.as_bytes()).await.unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.imported, 3);
        assert!(report.skipped.is_empty());

        assert_eq!(stock_of(&store, 1).await, dec("11"));
        assert_eq!(stock_of(&store, 2).await, dec("3"));
    }

    #[tokio::test]
    async fn test_imported_entries_are_valued_and_tagged() {
        let (store, service) = setup().await;
        let csv = "product,quantity,direction,supplier\nBeans,2,in,Farm Co\n";

        service.import_stock(csv.as_bytes()).await.unwrap();

        let log = store
            .list_movements(&MovementFilter {
                product_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].reason, reason::IMPORT);
        assert_eq!(log[0].direction, MovementDirection::In);
        assert_eq!(log[0].value, dec("17"));
        assert_eq!(log[0].supplier.as_deref(), Some("Farm Co"));
    }

    #[tokio::test]
    async fn test_unknown_product_skipped_and_import_continues() {
        let (store, service) = setup().await;
        let csv = "product,quantity,direction\n\
                   Sugar,1,in\n\
                   Rice,2,in\n";

        let report = service.import_stock(csv.as_bytes()).await.unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert!(report.skipped[0].reason.contains("Sugar"));

        assert_eq!(stock_of(&store, 1).await, dec("12"));

        // Only the Rice row reached the log and no product was created
        let log = store.list_movements(&MovementFilter::default()).await.unwrap();
        let imported: Vec<_> = log.iter().filter(|m| m.reason == reason::IMPORT).collect();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].product_name, "Rice");
        assert!(log.iter().all(|m| m.product_name != "Sugar"));
        assert_eq!(store.list_products(true).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_outbound_beyond_stock_skipped() {
        let (store, service) = setup().await;
        let csv = "product,quantity,direction\nRice,11,out\nRice,10,out\n";

        let report = service.import_stock(csv.as_bytes()).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);

        assert_eq!(stock_of(&store, 1).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_malformed_rows_reported_by_line() {
        let (_, service) = setup().await;
        let csv = "product,quantity,direction\n\
                   Rice,abc,in\n\
                   Rice,2,sideways\n\
                   ,2,in\n\
                   Rice,-1,in\n\
                   Rice,1,in\n";

        let report = service.import_stock(csv.as_bytes()).await.unwrap();
        assert_eq!(report.total_rows, 5);
        assert_eq!(report.imported, 1);
        let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_line_numbers_follow_multiline_fields() {
        let (_, service) = setup().await;
        let csv = "product,quantity,direction,supplier\n\
                   Rice,1,in,\"Acme\nWarehouse 2\"\n\
                   Sugar,1,in,\n";

        let report = service.import_stock(csv.as_bytes()).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped.len(), 1);
        // The quoted supplier spans lines 2 and 3
        assert_eq!(report.skipped[0].line, 4);
    }

    #[tokio::test]
    async fn test_inactive_product_rows_skipped() {
        let (store, service) = setup().await;
        store.deactivate_product(1).await.unwrap();

        let report = service
            .import_stock(b"product,quantity,direction\n1,5,in\nRice,5,in\n")
            .await
            .unwrap();
        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(stock_of(&store, 1).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_semicolon_file_with_comma_decimals() {
        let (store, service) = setup().await;
        let csv = "produto;quantidade;tipo;fornecedor\nRice;2,5;Entrada;Acme\nBeans;0,5;entrada;\n";

        let report = service.import_stock(csv.as_bytes()).await.unwrap();
        assert_eq!(report.imported, 2);

        assert_eq!(stock_of(&store, 1).await, dec("12.5"));
        assert_eq!(stock_of(&store, 2).await, dec("0.5"));
    }

    #[tokio::test]
    async fn test_header_only_file_imports_nothing() {
        let (_, service) = setup().await;

        let report = service
            .import_stock(b"product,quantity,direction\n")
            .await
            .unwrap();
        assert_eq!(report.total_rows, 0);
        assert_eq!(report.imported, 0);
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let (_, service) = setup().await;

        let err = service.import_stock(b"  \n").await.unwrap_err();
        assert!(matches!(err, AppError::BadUpload(_)));
    }

    #[tokio::test]
    async fn test_binary_upload_rejected() {
        let (store, service) = setup().await;
        // Start of a zip container, as an .xlsx upload would send
        let workbook = [0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, b'\n', 0xc3, 0x28, b',', b'1', b'\n'];

        let err = service.import_stock(&workbook).await.unwrap_err();
        assert!(matches!(err, AppError::BadUpload(_)));

        let log = store.list_movements(&MovementFilter::default()).await.unwrap();
        assert_eq!(log.len(), 1);
    }
}
