#![allow(dead_code)]

use catalog_service::config::{CatalogConfig, MongoConfig, StoreBackend, StoreConfig};
use catalog_service::services::CatalogStore;
use catalog_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn CatalogStore>,
    pub client: reqwest::Client,
}

pub fn test_config(backend: StoreBackend, database: &str) -> CatalogConfig {
    CatalogConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        mongodb: MongoConfig {
            uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: database.to_string(),
            server_selection_timeout_secs: 2,
        },
        store: StoreConfig { backend },
    }
}

impl TestApp {
    /// Spawns the service on a random port backed by the in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config(StoreBackend::Memory, "unused")).await
    }

    pub async fn spawn_with(config: CatalogConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        Self::launch(app).await
    }

    pub async fn spawn_with_store(store: Arc<dyn CatalogStore>) -> Self {
        let app = Application::build_with_store(test_config(StoreBackend::Memory, "unused"), store)
            .await
            .expect("Failed to build test application");
        Self::launch(app).await
    }

    async fn launch(app: Application) -> Self {
        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let ready_url = format!("{}/ready", address);
        for _ in 0..50 {
            if client.get(&ready_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            store,
            client,
        }
    }

    pub async fn post_product(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/details/add", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }
}
