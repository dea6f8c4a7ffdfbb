//! 集成测试共用的服务构建

use axum_test::TestServer;
use gestio::{infrastructure::store::MemoryProductStore, router, AppState, ProductService};
use std::sync::Arc;
use std::time::Duration;

pub fn test_server() -> (TestServer, Arc<MemoryProductStore>) {
    let store = Arc::new(MemoryProductStore::new());
    let service = ProductService::new(store.clone(), 5);
    let app = router(AppState::new(service), Duration::from_secs(5));
    (TestServer::new(app).unwrap(), store)
}
