use crate::config::{CatalogConfig, StoreBackend};
use crate::handlers;
use crate::services::{CatalogStore, InMemoryCatalogStore, MongoCatalogStore};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    any_origin_cors, metrics_middleware, request_id_middleware, REQUEST_ID_HEADER,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: CatalogConfig,
    pub store: Arc<dyn CatalogStore>,
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    /// Builds the store named by `config.store.backend` and binds the listener.
    pub async fn build(config: CatalogConfig) -> Result<Self, AppError> {
        let store: Arc<dyn CatalogStore> = match config.store.backend {
            StoreBackend::Mongo => {
                let store = MongoCatalogStore::connect(
                    &config.mongodb.uri,
                    &config.mongodb.database,
                    Duration::from_secs(config.mongodb.server_selection_timeout_secs),
                )
                .await?;
                store.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                Arc::new(store)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory catalog store; records are lost on restart");
                Arc::new(InMemoryCatalogStore::new())
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Binds the listener around an already constructed store.
    pub async fn build_with_store(
        config: CatalogConfig,
        store: Arc<dyn CatalogStore>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store,
        };

        let router = router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router,
            state,
        })
    }

    pub fn store(&self) -> Arc<dyn CatalogStore> {
        self.state.store.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}

/// The full HTTP surface: catalog routes, probes and metrics.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/details", get(handlers::find_all))
        .route("/details/add", post(handlers::save))
        .route("/details/:category", get(handlers::find_by_category))
        .fallback(handlers::not_found)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outside the trace layer so the span sees a minted id too.
        .layer(from_fn(request_id_middleware))
        .layer(any_origin_cors())
        .with_state(state)
}
