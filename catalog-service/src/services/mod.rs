pub mod memory;
pub mod metrics;
pub mod mongo;
pub mod store;

pub use memory::InMemoryCatalogStore;
pub use metrics::{get_metrics, init_metrics, record_store_operation};
pub use mongo::MongoCatalogStore;
pub use store::CatalogStore;
