use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Settings shared by every service: listener port and logging knobs.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut config: Config = config.try_deserialize()?;

        // Unprefixed variables are what the deployment manifests set.
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(endpoint) = env::var("OTLP_ENDPOINT") {
            config.otlp_endpoint = Some(endpoint).filter(|e| !e.is_empty());
        }

        Ok(config)
    }
}

/// True when `ENVIRONMENT=prod`.
pub fn is_production() -> bool {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod"
}

/// Reads `key`, falling back to `default` outside production.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_uses_default_outside_prod() {
        let value = get_env("SERVICE_CORE_TEST_UNSET_VAR", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn missing_variable_without_default_is_an_error() {
        let err = get_env("SERVICE_CORE_TEST_UNSET_VAR", None, false).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("SERVICE_CORE_TEST_UNSET_VAR"));
    }

    #[test]
    fn production_ignores_defaults() {
        let err = get_env("SERVICE_CORE_TEST_UNSET_VAR", Some("fallback"), true).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn empty_source_deserializes_defaults() {
        let config: Config = Cfg::builder().build().unwrap().try_deserialize().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(config.otlp_endpoint.is_none());
    }
}
