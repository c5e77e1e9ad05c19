mod common;

use async_trait::async_trait;
use catalog_service::models::ProductDetails;
use catalog_service::services::CatalogStore;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use service_core::error::AppError;
use std::sync::Arc;

/// A store whose backend is never reachable.
struct UnreachableStore;

fn unreachable() -> AppError {
    AppError::StorageUnavailable(anyhow::anyhow!("server selection timeout"))
}

#[async_trait]
impl CatalogStore for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<ProductDetails>, AppError> {
        Err(unreachable())
    }

    async fn find_by_category(&self, _category: &str) -> Result<Vec<ProductDetails>, AppError> {
        Err(unreachable())
    }

    async fn save(&self, _record: ProductDetails) -> Result<ProductDetails, AppError> {
        Err(unreachable())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(unreachable())
    }
}

#[tokio::test]
async fn reads_surface_storage_outage_as_server_error() {
    let app = TestApp::spawn_with_store(Arc::new(UnreachableStore)).await;

    for path in ["/details", "/details/shoes"] {
        let (status, body) = app.get_json(path).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "path {}", path);
        assert_eq!(body["error"], "Storage unavailable");
    }
}

#[tokio::test]
async fn save_surfaces_storage_outage_as_server_error() {
    let app = TestApp::spawn_with_store(Arc::new(UnreachableStore)).await;

    let response = app
        .post_product(&json!({ "category": "shoes", "name": "Runner" }))
        .await;

    assert!(response.status().is_server_error());
}

#[tokio::test]
async fn health_reports_unhealthy_store() {
    let app = TestApp::spawn_with_store(Arc::new(UnreachableStore)).await;

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");

    let ready = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}
