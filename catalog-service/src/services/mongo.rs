use crate::models::ProductDetails;
use crate::services::metrics::record_store_operation;
use crate::services::store::CatalogStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Document},
    options::{ClientOptions, FindOneOptions, IndexOptions, ReplaceOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use std::time::Duration;

pub const PRODUCTS_COLLECTION: &str = "product_details";

#[derive(Clone)]
pub struct MongoCatalogStore {
    client: MongoClient,
    db: Database,
}

impl MongoCatalogStore {
    pub async fn connect(
        uri: &str,
        database: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        options.app_name = Some("catalog-service".to_string());
        options.server_selection_timeout = Some(server_selection_timeout);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for catalog-service");

        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(
                IndexOptions::builder()
                    .name("category_lookup".to_string())
                    .build(),
            )
            .build();

        self.products()
            .create_index(category_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create category index on {} collection: {}",
                    PRODUCTS_COLLECTION,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on {}.category", PRODUCTS_COLLECTION);

        Ok(())
    }

    pub fn products(&self) -> Collection<ProductDetails> {
        self.db.collection(PRODUCTS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn raw_products(&self) -> Collection<Document> {
        self.db.collection(PRODUCTS_COLLECTION)
    }

    /// The `_id` value a record with this id is (or will be) stored under.
    ///
    /// Hex ids that parse as ObjectIds keep whichever key type an existing
    /// document already uses, and default to ObjectId for new documents.
    async fn storage_key(&self, id: &str) -> Result<Bson, AppError> {
        let oid = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(Bson::String(id.to_string())),
        };

        let options = FindOneOptions::builder()
            .projection(doc! { "_id": 1 })
            .build();
        let existing = self
            .raw_products()
            .find_one(doc! { "_id": { "$in": [oid, id] } }, options)
            .await?;

        Ok(existing
            .and_then(|document| document.get("_id").cloned())
            .unwrap_or(Bson::ObjectId(oid)))
    }

    async fn find_matching(&self, filter: Document) -> Result<Vec<ProductDetails>, AppError> {
        let cursor = self.products().find(filter, None).await?;
        let records: Vec<ProductDetails> = cursor.try_collect().await?;
        Ok(records)
    }
}

#[async_trait]
impl CatalogStore for MongoCatalogStore {
    async fn find_all(&self) -> Result<Vec<ProductDetails>, AppError> {
        let result = self.find_matching(doc! {}).await;
        record_store_operation("find_all", result.is_ok());

        let records = result.map_err(|e| {
            tracing::error!("Failed to list product details: {}", e);
            e
        })?;
        tracing::debug!(count = records.len(), "Listed product details");
        Ok(records)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductDetails>, AppError> {
        if category.is_empty() {
            return Ok(Vec::new());
        }

        let result = self.find_matching(doc! { "category": category }).await;
        record_store_operation("find_by_category", result.is_ok());

        let records = result.map_err(|e| {
            tracing::error!(category = %category, "Failed to query product details: {}", e);
            e
        })?;
        tracing::debug!(category = %category, count = records.len(), "Queried product details");
        Ok(records)
    }

    async fn save(&self, mut record: ProductDetails) -> Result<ProductDetails, AppError> {
        let id = record.ensure_id().to_string();
        let options = ReplaceOptions::builder().upsert(true).build();

        let result = async {
            let key = self.storage_key(&id).await?;
            let document = keyed_document(&record, key.clone())?;
            self.raw_products()
                .replace_one(doc! { "_id": key }, document, options)
                .await
                .map_err(AppError::from)
        }
        .await;
        record_store_operation("save", result.is_ok());

        let outcome = result.map_err(|e| {
            tracing::error!(product_id = %id, "Failed to save product details: {}", e);
            e
        })?;

        tracing::info!(
            product_id = %id,
            replaced = outcome.matched_count > 0,
            "Saved product details"
        );
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}

/// Serializes `record` with `key` as its `_id`, whatever BSON type the key has.
fn keyed_document(record: &ProductDetails, key: Bson) -> Result<Document, AppError> {
    let mut document = bson::to_document(record).map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("Failed to encode product details: {}", e))
    })?;
    document.insert("_id", key);
    Ok(document)
}
