//! PostgreSQL record store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    ledger, Expense, ExpenseDraft, MovementDirection, NewStockMovement, Period, Product,
    ProductChanges, ProductDraft, StockMovement,
};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool, Postgres, Transaction};
use std::time::Duration;

use super::{InventoryStore, MovementFilter, StockOperation, StockUpdate};
use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

const PRODUCT_COLUMNS: &str = "id, name, category, unit, stock, sale_price, registered_at, active";
const MOVEMENT_COLUMNS: &str =
    "id, product_id, product_name, moved_at, quantity, direction, reason, value, supplier";

/// Record store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

/// Row for product queries
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    unit: String,
    stock: Decimal,
    sale_price: Decimal,
    registered_at: DateTime<Utc>,
    active: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            category: row.category,
            unit: row.unit,
            stock: row.stock,
            sale_price: row.sale_price,
            registered_at: row.registered_at,
            active: row.active,
        }
    }
}

/// Row for stock movement queries
#[derive(Debug, FromRow)]
struct MovementRow {
    id: i64,
    product_id: i64,
    product_name: String,
    moved_at: DateTime<Utc>,
    quantity: Decimal,
    direction: String,
    reason: String,
    value: Decimal,
    supplier: Option<String>,
}

impl From<MovementRow> for StockMovement {
    fn from(row: MovementRow) -> Self {
        // The column is constrained to 'in' / 'out'
        let direction = if row.direction == "out" {
            MovementDirection::Out
        } else {
            MovementDirection::In
        };
        StockMovement {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            moved_at: row.moved_at,
            quantity: row.quantity,
            direction,
            reason: row.reason,
            value: row.value,
            supplier: row.supplier,
        }
    }
}

#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: i64,
    reason: String,
    amount: Decimal,
    spent_at: DateTime<Utc>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Expense {
            id: row.id,
            reason: row.reason,
            amount: row.amount,
            spent_at: row.spent_at,
        }
    }
}

fn period_binds(period: &Period) -> (Option<i32>, Option<i32>) {
    (period.year, period.month.map(|m| m as i32))
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open a pool from configuration and apply pending migrations if asked to
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let url = config.url.as_deref().ok_or_else(|| {
            AppError::Configuration("database.url is required for the postgres store".to_string())
        })?;

        tracing::info!("Connecting to database...");
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await?;
        tracing::info!("Database connection established");

        if config.run_migrations {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&db)
                .await
                .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
            tracing::info!("Migrations completed");
        }

        Ok(Self::new(db))
    }

    async fn lock_product(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> AppResult<Product> {
        let query = format!("SELECT {} FROM products WHERE id = $1 FOR UPDATE", PRODUCT_COLUMNS);
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
        Ok(row.into())
    }

    async fn insert_movement(
        tx: &mut Transaction<'_, Postgres>,
        entry: NewStockMovement,
    ) -> AppResult<StockMovement> {
        let query = format!(
            r#"
            INSERT INTO stock_movements (
                product_id, product_name, moved_at, quantity, direction, reason, value, supplier
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            MOVEMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, MovementRow>(&query)
            .bind(entry.product_id)
            .bind(&entry.product_name)
            .bind(entry.moved_at)
            .bind(entry.quantity)
            .bind(entry.direction.as_str())
            .bind(&entry.reason)
            .bind(entry.value)
            .bind(&entry.supplier)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.into())
    }

    async fn save_product(
        tx: &mut Transaction<'_, Postgres>,
        product: &Product,
    ) -> AppResult<Product> {
        let query = format!(
            r#"
            UPDATE products
            SET name = $1, category = $2, unit = $3, sale_price = $4, stock = $5, active = $6
            WHERE id = $7
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(&product.name)
            .bind(&product.category)
            .bind(&product.unit)
            .bind(product.sale_price)
            .bind(product.stock)
            .bind(product.active)
            .bind(product.id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.into())
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn list_products(&self, include_inactive: bool) -> AppResult<Vec<Product>> {
        let query = format!(
            "SELECT {} FROM products WHERE active OR $1 ORDER BY id",
            PRODUCT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(include_inactive)
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_product(&self, id: i64) -> AppResult<Option<Product>> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_active_product_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let query = format!(
            "SELECT {} FROM products WHERE active AND lower(name) = lower($1) ORDER BY id LIMIT 1",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(name.trim())
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn create_product(&self, draft: ProductDraft) -> AppResult<StockUpdate> {
        let mut tx = self.db.begin().await?;

        let query = format!(
            r#"
            INSERT INTO products (name, category, unit, stock, sale_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );
        let product: Product = sqlx::query_as::<_, ProductRow>(&query)
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(&draft.unit)
            .bind(draft.stock)
            .bind(draft.sale_price)
            .fetch_one(&mut *tx)
            .await?
            .into();

        let movement = match ledger::initial_entry(&product, product.registered_at) {
            Some(entry) => Some(Self::insert_movement(&mut tx, entry).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(StockUpdate { product, movement })
    }

    async fn update_product(&self, id: i64, changes: &ProductChanges) -> AppResult<StockUpdate> {
        let mut tx = self.db.begin().await?;
        let mut product = Self::lock_product(&mut tx, id).await?;

        changes.apply(&mut product);
        let mut movement = None;
        match changes.active {
            Some(false) if product.active => {
                let change = ledger::write_off(&product, Utc::now());
                if let Some(entry) = change.entry {
                    movement = Some(Self::insert_movement(&mut tx, entry).await?);
                }
                product.stock = change.new_stock;
                product.active = false;
            }
            Some(true) => product.active = true,
            _ => {}
        }
        let product = Self::save_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(StockUpdate { product, movement })
    }

    async fn change_stock(&self, id: i64, operation: &StockOperation) -> AppResult<StockUpdate> {
        let mut tx = self.db.begin().await?;
        let current = Self::lock_product(&mut tx, id).await?;

        let change = operation.plan(&current, Utc::now())?;
        let movement = match change.entry {
            Some(entry) => Some(Self::insert_movement(&mut tx, entry).await?),
            None => None,
        };
        let product = Self::save_product(
            &mut tx,
            &Product {
                stock: change.new_stock,
                ..current
            },
        )
        .await?;

        tx.commit().await?;

        Ok(StockUpdate { product, movement })
    }

    async fn list_movements(&self, filter: &MovementFilter) -> AppResult<Vec<StockMovement>> {
        let (year, month) = period_binds(&filter.period);
        let query = format!(
            r#"
            SELECT {}
            FROM stock_movements
            WHERE ($1::int IS NULL OR EXTRACT(YEAR FROM moved_at AT TIME ZONE 'UTC') = $1)
              AND ($2::int IS NULL OR EXTRACT(MONTH FROM moved_at AT TIME ZONE 'UTC') = $2)
              AND ($3::bigint IS NULL OR product_id = $3)
            ORDER BY moved_at DESC, id DESC
            "#,
            MOVEMENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, MovementRow>(&query)
            .bind(year)
            .bind(month)
            .bind(filter.product_id)
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_expense(&self, draft: ExpenseDraft) -> AppResult<Expense> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses (reason, amount)
            VALUES ($1, $2)
            RETURNING id, reason, amount, spent_at
            "#,
        )
        .bind(draft.reason.trim())
        .bind(draft.amount)
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn list_expenses(&self, period: &Period) -> AppResult<Vec<Expense>> {
        let (year, month) = period_binds(period);
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, reason, amount, spent_at
            FROM expenses
            WHERE ($1::int IS NULL OR EXTRACT(YEAR FROM spent_at AT TIME ZONE 'UTC') = $1)
              AND ($2::int IS NULL OR EXTRACT(MONTH FROM spent_at AT TIME ZONE 'UTC') = $2)
            ORDER BY spent_at DESC, id DESC
            "#,
        )
        .bind(year)
        .bind(month)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
