//! 商品存储抽象
//!
//! 托管文档库的访问都经过 [`ProductStore`]，处理器层只持有
//! `Arc<dyn ProductStore>`。

mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use memory::MemoryProductStore;
#[cfg(feature = "database")]
pub use postgres::PgProductStore;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::app::inventory::model::{InventoryStats, NewProduct, Product, ProductId};
use crate::infrastructure::config::{StoreBackend, StoreConfig};

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 连接不上存储，整个请求失败但不影响其他请求
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 新建商品，返回存储分配的 id
    async fn create(&self, product: &NewProduct) -> Result<ProductId, StoreError>;

    async fn read(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// 整体替换可编辑字段；记录不存在时返回 `false`
    async fn update(&self, id: ProductId, changes: &NewProduct) -> Result<bool, StoreError>;

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    /// 按名称排序；`search` 为不区分大小写的子串匹配
    async fn list(&self, search: Option<&str>) -> Result<Vec<Product>, StoreError>;

    async fn aggregate(&self, threshold: i64) -> Result<InventoryStats, StoreError>;

    /// 库存低于阈值的商品，按库存升序
    async fn low_stock(
        &self,
        threshold: i64,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// 重新计算过期的 `name_lower`，返回更新条数
    async fn backfill_name_lower(&self) -> Result<u64, StoreError>;
}

/// 按配置打开存储后端
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn ProductStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory product store");
            Ok(Arc::new(MemoryProductStore::new()))
        }
        #[cfg(feature = "database")]
        StoreBackend::Postgres => {
            let url = config
                .resolve_database_url()
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            let manager = crate::infrastructure::database::DatabaseManager::new(&url, config).await?;
            manager.ensure_schema().await?;
            Ok(Arc::new(PgProductStore::new(manager.get_pool().clone())))
        }
        #[cfg(not(feature = "database"))]
        StoreBackend::Postgres => Err(StoreError::Unavailable(
            "built without the `database` feature".to_string(),
        )),
    }
}
