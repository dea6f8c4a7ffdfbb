//! 库存应用：商品 CRUD、看板和低库存提醒

pub mod alert;
pub mod api;
pub mod handler;
pub mod model;
pub mod service;
pub mod views;

pub use handler::AppState;
pub use service::ProductService;
