use crate::models::ProductDetails;
use crate::services::metrics::record_store_operation;
use crate::services::store::CatalogStore;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store for development and tests.
///
/// Records keep the position of their first write; overwrites replace in place.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    records: Arc<RwLock<Vec<ProductDetails>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_all(&self) -> Result<Vec<ProductDetails>, AppError> {
        let records = self.records.read().await.clone();
        record_store_operation("find_all", true);
        Ok(records)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductDetails>, AppError> {
        if category.is_empty() {
            return Ok(Vec::new());
        }

        let matches: Vec<ProductDetails> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.has_category(category))
            .cloned()
            .collect();
        record_store_operation("find_by_category", true);
        tracing::debug!(category = %category, count = matches.len(), "Queried product details");
        Ok(matches)
    }

    async fn save(&self, mut record: ProductDetails) -> Result<ProductDetails, AppError> {
        let id = record.ensure_id().to_string();

        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id.as_deref() == Some(id.as_str())) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        drop(records);

        record_store_operation("save", true);
        tracing::info!(product_id = %id, "Saved product details");
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
