mod common;

use axum::http::StatusCode;
use gestio::app::inventory::model::ProductRow;
use gestio::core::{error::ErrorResponse, response::ApiResponse};
use serde_json::{json, Value};

use common::test_server;

#[tokio::test]
async fn test_create_and_get_product() {
    let (server, _) = test_server();

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": " Queso ",
            "price": 7.5,
            "quantity": 4,
            "category": "Lacteos"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: ApiResponse<ProductRow> = response.json();
    assert!(created.success);
    assert_eq!(created.data.product.name, "Queso");
    assert_eq!(created.data.product.category.as_deref(), Some("Lacteos"));
    assert!(created.data.low_stock);

    let fetched = server
        .get(&format!("/api/products/{}", created.data.product.id))
        .await;
    fetched.assert_status_ok();
    let fetched: ApiResponse<ProductRow> = fetched.json();
    assert_eq!(fetched.data.product, created.data.product);
}

#[tokio::test]
async fn test_validation_error() {
    let (server, _) = test_server();

    let response = server
        .post("/api/products")
        .json(&json!({ "name": "", "price": -1.0, "quantity": 3 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "BAD_REQUEST");
    assert!(body.message.contains("Price cannot be negative."));

    let list: ApiResponse<Vec<ProductRow>> = server.get("/api/products").await.json();
    assert!(list.data.is_empty());
}

#[tokio::test]
async fn test_update_and_delete_product() {
    let (server, _) = test_server();
    let created: ApiResponse<ProductRow> = server
        .post("/api/products")
        .json(&json!({ "name": "Pan", "price": 1.0, "quantity": 20 }))
        .await
        .json();
    let id = created.data.product.id;
    assert!(!created.data.low_stock);

    let updated = server
        .put(&format!("/api/products/{}", id))
        .json(&json!({ "name": "Pan", "price": 1.2, "quantity": 1 }))
        .await;
    updated.assert_status_ok();
    let updated: ApiResponse<ProductRow> = updated.json();
    assert_eq!(updated.data.product.quantity, 1);
    assert!(updated.data.low_stock);

    server
        .delete(&format!("/api/products/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let missing = server.get(&format!("/api/products/{}", id)).await;
    missing.assert_status_not_found();
    let body: ErrorResponse = missing.json();
    assert_eq!(body.error, "NOT_FOUND");

    server
        .delete(&format!("/api/products/{}", id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_products_with_search() {
    let (server, _) = test_server();
    for name in ["Manzana", "Mandarina", "Pera"] {
        server
            .post("/api/products")
            .json(&json!({ "name": name, "price": 0.5, "quantity": 30 }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all: ApiResponse<Vec<ProductRow>> = server.get("/api/products").await.json();
    assert_eq!(all.data.len(), 3);
    assert_eq!(all.total, Some(3));

    let found: ApiResponse<Vec<ProductRow>> = server.get("/api/products?q=MAN").await.json();
    let names: Vec<&str> = found.data.iter().map(|r| r.product.name.as_str()).collect();
    assert_eq!(names, vec!["Mandarina", "Manzana"]);
}

#[tokio::test]
async fn test_health_check() {
    let (server, store) = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "connected");

    store.set_reachable(false);
    let response = server.get("/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["store"], "unreachable");
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let (server, store) = test_server();
    store.set_reachable(false);

    let response = server.get("/api/products").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "SERVICE_UNAVAILABLE");
    assert_eq!(body.code, 503);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let (server, _) = test_server();

    for response in [
        server.get("/api/products/abc").await,
        server.delete("/api/products/abc").await,
        server
            .put("/api/products/abc")
            .json(&json!({ "name": "Te", "price": 1.0, "quantity": 1 }))
            .await,
    ] {
        response.assert_status_not_found();
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.code, 404);
    }
}

#[tokio::test]
async fn test_malformed_json_gets_error_envelope() {
    let (server, _) = test_server();

    let response = server
        .post("/api/products")
        .content_type("application/json")
        .bytes("{\"name\": ".into())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "BAD_REQUEST");

    let missing_field = server
        .post("/api/products")
        .json(&json!({ "name": "Te" }))
        .await;
    missing_field.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = missing_field.json();
    assert_eq!(body.error, "BAD_REQUEST");
}
