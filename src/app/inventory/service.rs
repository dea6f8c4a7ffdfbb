//! 库存业务服务

use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::alert::is_low_stock;
use super::model::{Dashboard, NewProduct, Product, ProductId, ProductRow};
use crate::core::error::CoreError;
use crate::infrastructure::store::ProductStore;

/// 看板中展示的最低库存商品数量
const DASHBOARD_LOWEST: usize = 5;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    threshold: i64,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, threshold: i64) -> Self {
        Self { store, threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    fn row(&self, product: Product) -> ProductRow {
        let low_stock = is_low_stock(product.quantity, self.threshold);
        ProductRow { product, low_stock }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<ProductRow>, CoreError> {
        let products = self.store.list(search).await?;
        Ok(products.into_iter().map(|p| self.row(p)).collect())
    }

    pub async fn find(&self, id: ProductId) -> Result<Option<ProductRow>, CoreError> {
        Ok(self.store.read(id).await?.map(|p| self.row(p)))
    }

    pub async fn get(&self, id: ProductId) -> Result<ProductRow, CoreError> {
        self.find(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn create(&self, product: NewProduct) -> Result<ProductRow, CoreError> {
        let product = product.normalized();
        product.validate()?;

        let id = self.store.create(&product).await?;
        info!("Created product: {} ({})", product.name, id);

        self.find(id).await?.ok_or_else(|| {
            CoreError::InternalServerError(format!("product {} vanished after create", id))
        })
    }

    /// 整体替换可编辑字段，低库存标记随新库存重新计算
    pub async fn update(&self, id: ProductId, changes: NewProduct) -> Result<ProductRow, CoreError> {
        let changes = changes.normalized();
        changes.validate()?;

        if !self.store.update(id, &changes).await? {
            return Err(CoreError::NotFound(format!("Product {} not found", id)));
        }
        info!("Updated product: {} ({})", changes.name, id);

        self.get(id).await
    }

    pub async fn delete(&self, id: ProductId) -> Result<(), CoreError> {
        if !self.store.delete(id).await? {
            return Err(CoreError::NotFound(format!("Product {} not found", id)));
        }
        info!("Deleted product: {}", id);
        Ok(())
    }

    pub async fn dashboard(&self) -> Result<Dashboard, CoreError> {
        let mut stats = self.store.aggregate(self.threshold).await?;
        stats.inventory_value = (stats.inventory_value * 100.0).round() / 100.0;

        let lowest_stock = self
            .store
            .low_stock(self.threshold, Some(DASHBOARD_LOWEST))
            .await?;

        Ok(Dashboard {
            stats,
            threshold: self.threshold,
            lowest_stock,
        })
    }

    pub async fn alerts(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.store.low_stock(self.threshold, None).await?)
    }

    pub async fn health(&self) -> Result<(), CoreError> {
        Ok(self.store.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryProductStore;
    use uuid::Uuid;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryProductStore::new()), 5)
    }

    #[tokio::test]
    async fn test_create_flags_low_stock() {
        let service = service();
        let low = service.create(NewProduct::new("Sal", 0.9, 3, None)).await.unwrap();
        let ok = service.create(NewProduct::new("Aceite", 4.2, 10, None)).await.unwrap();
        assert!(low.low_stock);
        assert!(!ok.low_stock);
    }

    #[tokio::test]
    async fn test_update_recomputes_flag() {
        let service = service();
        let row = service.create(NewProduct::new("Leche", 1.1, 10, None)).await.unwrap();

        let updated = service
            .update(row.product.id, NewProduct::new("Leche", 1.1, 2, None))
            .await
            .unwrap();
        assert_eq!(updated.product.quantity, 2);
        assert!(updated.low_stock);
        assert!(service.get(row.product.id).await.unwrap().low_stock);
    }

    #[tokio::test]
    async fn test_invalid_product_is_not_persisted() {
        let service = service();
        let result = service.create(NewProduct::new("   ", 1.0, 1, None)).await;
        assert!(matches!(result, Err(CoreError::BadRequest(_))));
        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let service = service();
        let id = Uuid::new_v4();
        assert!(matches!(service.get(id).await, Err(CoreError::NotFound(_))));
        assert!(matches!(service.delete(id).await, Err(CoreError::NotFound(_))));
        assert!(matches!(
            service.update(id, NewProduct::new("X", 1.0, 1, None)).await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_dashboard_metrics() {
        let service = service();
        for (name, price, quantity) in [
            ("A", 1.111, 3),
            ("B", 2.0, 10),
            ("C", 0.5, 1),
            ("D", 3.0, 4),
            ("E", 1.0, 0),
            ("F", 1.0, 2),
            ("G", 1.0, 5),
        ] {
            service
                .create(NewProduct::new(name, price, quantity, None))
                .await
                .unwrap();
        }

        let dashboard = service.dashboard().await.unwrap();
        assert_eq!(dashboard.threshold, 5);
        assert_eq!(dashboard.stats.total_products, 7);
        assert_eq!(dashboard.stats.total_quantity, 25);
        assert_eq!(dashboard.stats.low_stock_count, 5);
        // 3.333 + 20 + 0.5 + 12 + 0 + 2 + 5
        assert_eq!(dashboard.stats.inventory_value, 42.83);

        let lowest: Vec<i64> = dashboard.lowest_stock.iter().map(|p| p.quantity).collect();
        assert_eq!(lowest, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_alerts_are_sorted_ascending() {
        let service = service();
        service.create(NewProduct::new("X", 1.0, 4, None)).await.unwrap();
        service.create(NewProduct::new("Y", 1.0, 1, None)).await.unwrap();
        service.create(NewProduct::new("Z", 1.0, 9, None)).await.unwrap();

        let alerts = service.alerts().await.unwrap();
        let names: Vec<&str> = alerts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Y", "X"]);
    }
}
