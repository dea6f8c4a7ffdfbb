//! 库存 JSON 接口

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use super::{
    handler::AppState,
    model::{parse_product_id, ListQuery, NewProduct, ProductRow},
};
use crate::core::{error::CoreError, response::ApiResponse};

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductRow>>>, CoreError> {
    let rows = state.product_service.list(query.search()).await?;
    Ok(Json(ApiResponse::list(rows)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<ProductRow>>, CoreError> {
    let row = state.product_service.get(parse_product_id(&raw_id)?).await?;
    Ok(Json(ApiResponse::success(row)))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProductRow>>), CoreError> {
    let Json(payload) = payload?;
    let row = state.product_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<Json<ApiResponse<ProductRow>>, CoreError> {
    let id = parse_product_id(&raw_id)?;
    let Json(payload) = payload?;
    let row = state.product_service.update(id, payload).await?;
    Ok(Json(ApiResponse::success(row)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.product_service.delete(parse_product_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

// 健康检查
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, store) = match state.product_service.health().await {
        Ok(()) => (StatusCode::OK, "connected"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    let body = json!({
        "status": if status.is_success() { "healthy" } else { "degraded" },
        "store": store,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status, Json(body))
}
