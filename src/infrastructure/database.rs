//! 数据库基础设施

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::infrastructure::config::StoreConfig;
use crate::infrastructure::store::StoreError;

/// 小写名称可能比原名更长（如 'İ'），name_lower 不设长度限制
const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(120) NOT NULL,
    name_lower TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (price >= 0),
    quantity BIGINT NOT NULL DEFAULT 0 CHECK (quantity >= 0 AND quantity <= 1000000000),
    category VARCHAR(60),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(database_url: &str, config: &StoreConfig) -> Result<Self, StoreError> {
        info!(
            "Connecting to database with {} max connections",
            config.max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// 创建 products 表（已存在则跳过）
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        info!("Ensuring products table exists...");

        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS products_quantity_idx ON products (quantity)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS products_name_lower_idx ON products (name_lower)")
            .execute(&self.pool)
            .await?;

        info!("Products table ready");
        Ok(())
    }
}
