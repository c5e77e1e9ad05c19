use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored product record.
///
/// Only the key and `category` are typed; every other field the client sent
/// rides along untouched in `attributes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_record_id"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ProductDetails {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            id: None,
            category: Some(category.into()),
            attributes: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the record key, minting a fresh UUID when none (or an empty one) is set.
    pub fn ensure_id(&mut self) -> &str {
        if self.id.as_deref().map_or(true, str::is_empty) {
            self.id = Some(Uuid::new_v4().to_string());
        }
        self.id.as_deref().unwrap_or_default()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// Keys written by other tools may be ObjectIds; they are surfaced as hex strings.
fn deserialize_record_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::String(id)) => Ok(Some(id)),
        Some(Bson::ObjectId(oid)) => Ok(Some(oid.to_hex())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "unsupported record key type: {:?}",
            other.element_type()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc, oid::ObjectId};

    #[test]
    fn ensure_id_generates_when_absent_or_empty() {
        let mut record = ProductDetails::new("shoes");
        let generated = record.ensure_id().to_string();
        assert!(Uuid::parse_str(&generated).is_ok());

        let mut blank = ProductDetails::new("shoes").with_id("");
        assert!(!blank.ensure_id().is_empty());
    }

    #[test]
    fn ensure_id_keeps_client_key() {
        let mut record = ProductDetails::new("shoes").with_id("p1");
        assert_eq!(record.ensure_id(), "p1");
    }

    #[test]
    fn stores_key_as_underscore_id_and_flattens_attributes() {
        let record = ProductDetails::new("Speakers")
            .with_id("p1")
            .with_attribute("name", "Bookshelf")
            .with_attribute("price", 499);

        let document = bson::to_document(&record).unwrap();
        assert_eq!(document.get_str("_id").unwrap(), "p1");
        assert_eq!(document.get_str("category").unwrap(), "Speakers");
        assert_eq!(document.get_str("name").unwrap(), "Bookshelf");
        assert!(document.get("attributes").is_none());
    }

    #[test]
    fn reads_documents_with_object_id_keys() {
        let oid = ObjectId::new();
        let document = doc! { "_id": oid, "category": "Screen", "name": "Fixed frame" };

        let record: ProductDetails = bson::from_document(document).unwrap();
        assert_eq!(record.id, Some(oid.to_hex()));
        assert!(record.has_category("Screen"));
        assert_eq!(record.attributes["name"], "Fixed frame");
    }

    #[test]
    fn category_match_is_exact() {
        let record = ProductDetails::new("Shoes");
        assert!(record.has_category("Shoes"));
        assert!(!record.has_category("shoes"));
        assert!(!ProductDetails::default().has_category(""));
    }
}
