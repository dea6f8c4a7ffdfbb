//! PostgreSQL 存储实现

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use super::{ProductStore, StoreError};
use crate::app::inventory::model::{InventoryStats, NewProduct, Product, ProductId};

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, product: &NewProduct) -> Result<ProductId, StoreError> {
        let id: ProductId = sqlx::query_scalar(
            "INSERT INTO products (name, name_lower, price, quantity, category) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&product.name)
        .bind(product.name_lower())
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn read(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn update(&self, id: ProductId, changes: &NewProduct) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE products \
             SET name = $1, name_lower = $2, price = $3, quantity = $4, category = $5, \
                 updated_at = NOW() \
             WHERE id = $6",
        )
        .bind(&changes.name)
        .bind(changes.name_lower())
        .bind(changes.price)
        .bind(changes.quantity)
        .bind(&changes.category)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let products = match search {
            Some(search) => {
                sqlx::query_as::<_, Product>(
                    "SELECT * FROM products WHERE strpos(name_lower, $1) > 0 \
                     ORDER BY name_lower, id",
                )
                .bind(search.to_lowercase())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name_lower, id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(products)
    }

    async fn aggregate(&self, threshold: i64) -> Result<InventoryStats, StoreError> {
        let stats = sqlx::query_as::<_, InventoryStats>(
            r#"
            SELECT
                COUNT(*)::BIGINT AS total_products,
                COALESCE(SUM(quantity), 0)::BIGINT AS total_quantity,
                COUNT(*) FILTER (WHERE quantity < $1)::BIGINT AS low_stock_count,
                COALESCE(SUM(price * quantity), 0)::DOUBLE PRECISION AS inventory_value
            FROM products
            "#,
        )
        .bind(threshold)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn low_stock(
        &self,
        threshold: i64,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError> {
        // LIMIT NULL 等价于不限制
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE quantity < $1 ORDER BY quantity, name_lower LIMIT $2",
        )
        .bind(threshold)
        .bind(limit.map(|l| l as i64))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn backfill_name_lower(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE products SET name_lower = LOWER(BTRIM(name)) \
             WHERE BTRIM(name) <> '' AND name_lower IS DISTINCT FROM LOWER(BTRIM(name))",
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
