use crate::models::ProductDetails;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /details/add`.
///
/// The key may arrive as `id`, as `_id`, or as both (a record echoed back
/// from a response); `id` wins when both are set.
#[derive(Debug, Deserialize)]
pub struct SaveProductRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub storage_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl From<SaveProductRequest> for ProductDetails {
    fn from(req: SaveProductRequest) -> Self {
        Self {
            id: req.id.filter(|id| !id.is_empty()).or(req.storage_id),
            category: req.category,
            attributes: req.attributes,
        }
    }
}

/// Outbound record. The key is sent both as `id` and as `_id`, which is the
/// name existing quotation clients read.
#[derive(Debug, Serialize)]
pub struct ProductDetailsResponse {
    pub id: String,
    #[serde(rename = "_id")]
    pub storage_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(record: ProductDetails) -> Self {
        let id = record.id.unwrap_or_default();
        Self {
            storage_id: id.clone(),
            id,
            category: record.category,
            attributes: record.attributes,
        }
    }
}
