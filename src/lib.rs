//! # Gestio 库存面板
//!
//! 基于 Axum 的库存管理面板：
//! - 商品的新建、编辑、删除和列表
//! - 库存看板（商品数、总库存、低库存数、库存总值）
//! - 按全局阈值的低库存提醒
//!
//! 存储通过 [`infrastructure::store::ProductStore`] 抽象，
//! 默认使用 PostgreSQL，开发和测试可切换到内存实现。

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::inventory::{AppState, ProductService};
pub use app::router;
pub use infrastructure::config::Config;
