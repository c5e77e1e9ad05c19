use serde::Deserialize;
use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// How long the driver may wait for a reachable server before a query fails.
    pub server_selection_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        let backend: StoreBackend = get_env("CATALOG_STORE_BACKEND", Some("mongo"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // The in-memory backend never dials out, so a URI is only mandatory for Mongo.
        let uri_default = match backend {
            StoreBackend::Mongo => None,
            StoreBackend::Memory => Some("mongodb://localhost:27017"),
        };

        Ok(CatalogConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", uri_default, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("catalog_db"), is_prod)?,
                server_selection_timeout_secs: get_env(
                    "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                    Some("5"),
                    is_prod,
                )?
                .parse()
                .map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "MONGODB_SERVER_SELECTION_TIMEOUT_SECS is not a number: {}",
                        e
                    ))
                })?,
            },
            store: StoreConfig { backend },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}
