//! 应用层：路由和各业务模块

pub mod inventory;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use inventory::{api, handler, AppState};

// 创建路由
pub fn router(state: AppState, timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handler::home))
        .route("/health", get(api::health_check))
        // 面板页面
        .route("/panel/products", get(handler::list_products))
        .route(
            "/panel/products/new",
            get(handler::new_product_form).post(handler::create_product),
        )
        .route(
            "/panel/products/:id/edit",
            get(handler::edit_product_form).post(handler::update_product),
        )
        .route("/panel/products/:id/delete", post(handler::delete_product))
        .route("/panel/dashboard", get(handler::dashboard))
        .route("/panel/alerts", get(handler::alerts))
        // JSON 接口
        .route(
            "/api/products",
            get(api::list_products).post(api::create_product),
        )
        .route(
            "/api/products/:id",
            get(api::get_product)
                .put(api::update_product)
                .delete(api::delete_product),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
