//! 内存存储，用于本地开发和测试

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductStore, StoreError};
use crate::app::inventory::{
    alert::is_low_stock,
    model::{InventoryStats, NewProduct, Product, ProductId},
};

pub struct MemoryProductStore {
    products: RwLock<HashMap<ProductId, Product>>,
    reachable: AtomicBool,
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            reachable: AtomicBool::new(true),
        }
    }
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入已有记录（保留 id 和 `name_lower` 原样）
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(|p| (p.id, p)).collect()),
            reachable: AtomicBool::new(true),
        }
    }

    /// 模拟存储断连
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store marked unreachable".to_string()))
        }
    }
}

fn sort_by_name(products: &mut [Product]) {
    products.sort_by(|a, b| a.name_lower.cmp(&b.name_lower).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, product: &NewProduct) -> Result<ProductId, StoreError> {
        self.check()?;
        let now = Utc::now();
        let record = Product {
            id: Uuid::new_v4(),
            name: product.name.clone(),
            name_lower: product.name_lower(),
            price: product.price,
            quantity: product.quantity,
            category: product.category.clone(),
            created_at: now,
            updated_at: now,
        };
        let id = record.id;
        self.products.write().await.insert(id, record);
        Ok(id)
    }

    async fn read(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.check()?;
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn update(&self, id: ProductId, changes: &NewProduct) -> Result<bool, StoreError> {
        self.check()?;
        let mut products = self.products.write().await;
        let Some(record) = products.get_mut(&id) else {
            return Ok(false);
        };
        record.name = changes.name.clone();
        record.name_lower = changes.name_lower();
        record.price = changes.price;
        record.quantity = changes.quantity;
        record.category = changes.category.clone();
        record.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.products.write().await.remove(&id).is_some())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Product>, StoreError> {
        self.check()?;
        let needle = search.map(str::to_lowercase);
        let mut products: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| match &needle {
                Some(needle) => p.name_lower.contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        sort_by_name(&mut products);
        Ok(products)
    }

    async fn aggregate(&self, threshold: i64) -> Result<InventoryStats, StoreError> {
        self.check()?;
        let products = self.products.read().await;
        products.values().try_fold(InventoryStats::default(), |mut acc, p| -> Result<_, StoreError> {
            acc.total_products += 1;
            acc.total_quantity = acc
                .total_quantity
                .checked_add(p.quantity)
                .ok_or_else(|| StoreError::Query("total quantity out of range".to_string()))?;
            acc.inventory_value += p.price * p.quantity as f64;
            if is_low_stock(p.quantity, threshold) {
                acc.low_stock_count += 1;
            }
            Ok(acc)
        })
    }

    async fn low_stock(
        &self,
        threshold: i64,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError> {
        self.check()?;
        let mut products: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| is_low_stock(p.quantity, threshold))
            .cloned()
            .collect();
        products.sort_by(|a, b| {
            a.quantity
                .cmp(&b.quantity)
                .then_with(|| a.name_lower.cmp(&b.name_lower))
        });
        if let Some(limit) = limit {
            products.truncate(limit);
        }
        Ok(products)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    async fn backfill_name_lower(&self) -> Result<u64, StoreError> {
        self.check()?;
        let mut updated = 0;
        for product in self.products.write().await.values_mut() {
            let name = product.name.trim();
            if name.is_empty() {
                continue;
            }
            let expected = name.to_lowercase();
            if product.name_lower != expected {
                product.name_lower = expected;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
