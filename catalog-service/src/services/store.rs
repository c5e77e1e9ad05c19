use crate::models::ProductDetails;
use async_trait::async_trait;
use service_core::error::AppError;

/// Persistence for product records, keyed by record id.
///
/// Ordering of returned sequences is backend-defined.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every persisted record.
    async fn find_all(&self) -> Result<Vec<ProductDetails>, AppError>;

    /// Records whose category equals `category` exactly. An empty category
    /// or no matches yields an empty vector.
    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductDetails>, AppError>;

    /// Inserts or replaces by id, assigning an id when the record has none.
    /// Returns the record as persisted.
    async fn save(&self, record: ProductDetails) -> Result<ProductDetails, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
