//! Product catalogue tests
//!
//! Tests for product registration and lifecycle including:
//! - Initial stock is logged exactly once
//! - Deactivation writes off remaining stock
//! - Edits never touch the stock quantity

use std::str::FromStr;
use std::sync::Arc;

use inventory_finance_backend::services::ProductService;
use inventory_finance_backend::store::MovementFilter;
use inventory_finance_backend::{AppError, InventoryStore, MemoryStore};
use rust_decimal::Decimal;
use shared::{reason, MovementDirection, ProductChanges, ProductDraft};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn draft(name: &str, stock: &str, price: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        category: "grocery".to_string(),
        unit: "kg".to_string(),
        stock: dec(stock),
        sale_price: dec(price),
    }
}

fn setup() -> (Arc<dyn InventoryStore>, ProductService) {
    let store: Arc<dyn InventoryStore> = Arc::new(MemoryStore::new());
    let service = ProductService::new(store.clone());
    (store, service)
}

// ============================================================================
// Registration
// ============================================================================

#[cfg(test)]
mod registration_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_with_stock_logs_initial_entry() {
        let (store, service) = setup();

        let created = service.create_product(draft("Rice", "12", "6.50")).await.unwrap();
        assert_eq!(created.product.stock, dec("12"));
        assert!(created.product.active);

        let movement = created.movement.expect("initial entry");
        assert_eq!(movement.direction, MovementDirection::In);
        assert_eq!(movement.quantity, dec("12"));
        assert_eq!(movement.reason, reason::INITIAL_REGISTRATION);
        assert_eq!(movement.value, Decimal::ZERO);

        let log = store.list_movements(&MovementFilter::default()).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].product_id, created.product.id);
    }

    #[tokio::test]
    async fn test_create_without_stock_logs_nothing() {
        let (store, service) = setup();

        let created = service.create_product(draft("Beans", "0", "8")).await.unwrap();
        assert!(created.movement.is_none());

        let log = store.list_movements(&MovementFilter::default()).await.unwrap();
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_create_trims_names() {
        let (_, service) = setup();

        let created = service.create_product(draft("  Rice  ", "1", "2")).await.unwrap();
        assert_eq!(created.product.name, "Rice");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_drafts() {
        let (_, service) = setup();

        let err = service.create_product(draft("Rice", "-1", "2")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "stock"));

        let err = service.create_product(draft("   ", "1", "2")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "name"));

        let err = service.create_product(draft("Rice", "1", "-0.01")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "sale_price"));
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let (_, service) = setup();

        let a = service.create_product(draft("A", "0", "1")).await.unwrap();
        let b = service.create_product(draft("B", "0", "1")).await.unwrap();
        assert!(b.product.id > a.product.id);
    }
}

// ============================================================================
// Editing and deactivation
// ============================================================================

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_descriptive_fields() {
        let (_, service) = setup();
        let created = service.create_product(draft("Rice", "5", "6")).await.unwrap();

        let changes = ProductChanges {
            name: Some("Rice 5kg".to_string()),
            sale_price: Some(dec("7.25")),
            ..Default::default()
        };
        let product = service.update_product(created.product.id, changes).await.unwrap();

        assert_eq!(product.name, "Rice 5kg");
        assert_eq!(product.sale_price, dec("7.25"));
        assert_eq!(product.stock, dec("5"));
        assert_eq!(product.category, "grocery");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let (store, service) = setup();
        let created = service.create_product(draft("Rice", "5", "6")).await.unwrap();

        let changes = ProductChanges {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let err = service.update_product(created.product.id, changes).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "name"));

        let product = store.get_product(created.product.id).await.unwrap().unwrap();
        assert_eq!(product.name, "Rice");
        assert!(store.find_active_product_by_name("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_trims_fields() {
        let (_, service) = setup();
        let created = service.create_product(draft("Rice", "5", "6")).await.unwrap();

        let changes = ProductChanges {
            category: Some("  pantry ".to_string()),
            ..Default::default()
        };
        let product = service.update_product(created.product.id, changes).await.unwrap();
        assert_eq!(product.category, "pantry");
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let (_, service) = setup();

        let err = service
            .update_product(99, ProductChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_deactivate_writes_off_stock() {
        let (store, service) = setup();
        let created = service.create_product(draft("Soap", "4", "3.50")).await.unwrap();

        let update = service.deactivate_product(created.product.id).await.unwrap();
        assert!(!update.product.active);
        assert_eq!(update.product.stock, Decimal::ZERO);

        let movement = update.movement.expect("write-off entry");
        assert_eq!(movement.direction, MovementDirection::Out);
        assert_eq!(movement.quantity, dec("4"));
        assert_eq!(movement.reason, reason::DEACTIVATION_WRITE_OFF);

        let log = store.list_movements(&MovementFilter::default()).await.unwrap();
        assert_eq!(log.len(), 2);
        // Newest first
        assert_eq!(log[0].reason, reason::DEACTIVATION_WRITE_OFF);
    }

    #[tokio::test]
    async fn test_deactivate_twice_is_noop() {
        let (store, service) = setup();
        let created = service.create_product(draft("Soap", "4", "3.50")).await.unwrap();

        service.deactivate_product(created.product.id).await.unwrap();
        let second = service.deactivate_product(created.product.id).await.unwrap();
        assert!(second.movement.is_none());

        let log = store.list_movements(&MovementFilter::default()).await.unwrap();
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_update_with_inactive_flag_deactivates() {
        let (_, service) = setup();
        let created = service.create_product(draft("Soap", "2", "3")).await.unwrap();

        let changes = ProductChanges {
            active: Some(false),
            ..Default::default()
        };
        let product = service.update_product(created.product.id, changes).await.unwrap();
        assert!(!product.active);
        assert_eq!(product.stock, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_rename_and_deactivate_in_one_update() {
        let (store, service) = setup();
        let created = service.create_product(draft("Soap", "2", "3")).await.unwrap();

        let changes = ProductChanges {
            name: Some("Old soap".to_string()),
            active: Some(false),
            ..Default::default()
        };
        let product = service.update_product(created.product.id, changes).await.unwrap();
        assert_eq!(product.name, "Old soap");
        assert!(!product.active);

        let log = store.list_movements(&MovementFilter::default()).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].reason, reason::DEACTIVATION_WRITE_OFF);
        assert_eq!(log[0].product_name, "Old soap");
    }

    #[tokio::test]
    async fn test_rejected_update_does_not_deactivate() {
        let (store, service) = setup();
        let created = service.create_product(draft("Soap", "2", "3")).await.unwrap();

        let changes = ProductChanges {
            unit: Some(String::new()),
            active: Some(false),
            ..Default::default()
        };
        assert!(service.update_product(created.product.id, changes).await.is_err());

        let product = store.get_product(created.product.id).await.unwrap().unwrap();
        assert!(product.active);
        assert_eq!(product.stock, dec("2"));
    }

    #[tokio::test]
    async fn test_inactive_products_hidden_by_default() {
        let (_, service) = setup();
        let kept = service.create_product(draft("Kept", "1", "1")).await.unwrap();
        let gone = service.create_product(draft("Gone", "1", "1")).await.unwrap();
        service.deactivate_product(gone.product.id).await.unwrap();

        let active = service.list_products(false).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.product.id);

        let all = service.list_products(true).await.unwrap();
        assert_eq!(all.len(), 2);

        // Still retrievable by id
        let product = service.get_product(gone.product.id).await.unwrap();
        assert!(!product.active);
    }

    #[tokio::test]
    async fn test_reactivate_keeps_zero_stock() {
        let (_, service) = setup();
        let created = service.create_product(draft("Soap", "2", "3")).await.unwrap();
        service.deactivate_product(created.product.id).await.unwrap();

        let changes = ProductChanges {
            active: Some(true),
            ..Default::default()
        };
        let product = service.update_product(created.product.id, changes).await.unwrap();
        assert!(product.active);
        assert_eq!(product.stock, Decimal::ZERO);
    }
}
