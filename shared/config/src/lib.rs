//! Process-wide configuration for the search functions service.
//!
//! Credentials and collaborator endpoints are read once at startup and handed
//! to the handlers as an immutable [`AppConfig`]. Missing credentials fail
//! the process before the server binds.

use std::env;
use std::fmt;

use thiserror::Error;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const EMBEDDING_MODEL: &str = "EMBEDDING_MODEL";
pub const SEARCH_SERVICE_API_KEY: &str = "SEARCH_SERVICE_API_KEY";
pub const OPENAI_API_BASE: &str = "OPENAI_API_BASE";
pub const SEARCH_API_VERSION: &str = "SEARCH_API_VERSION";
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
pub const ROUTE_PREFIX: &str = "ROUTE_PREFIX";

pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
/// First GA version of the search REST API that accepts `vectorQueries`.
pub const DEFAULT_SEARCH_API_VERSION: &str = "2023-11-01";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7071;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required configuration key {0} is not set")]
    Missing(&'static str),
    #[error("configuration key {key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub embedding_model: String,
    pub search_api_key: String,
    pub openai_api_base: String,
    pub search_api_version: String,
    pub host: String,
    pub port: u16,
    pub route_prefix: String,
}

impl AppConfig {
    /// Load from the process environment. Callers merge any `.env` file first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get(PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: PORT, value: raw })?,
            None => DEFAULT_PORT,
        };

        let config = Self {
            openai_api_key: require(OPENAI_API_KEY)?,
            embedding_model: require(EMBEDDING_MODEL)?,
            search_api_key: require(SEARCH_SERVICE_API_KEY)?,
            openai_api_base: get(OPENAI_API_BASE)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            search_api_version: get(SEARCH_API_VERSION)
                .unwrap_or_else(|| DEFAULT_SEARCH_API_VERSION.to_string()),
            host: get(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            route_prefix: get(ROUTE_PREFIX)
                .map(|p| normalize_prefix(&p))
                .unwrap_or_default(),
        };

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

// Keys never reach the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"<redacted>")
            .field("embedding_model", &self.embedding_model)
            .field("search_api_key", &"<redacted>")
            .field("openai_api_base", &self.openai_api_base)
            .field("search_api_version", &self.search_api_version)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("route_prefix", &self.route_prefix)
            .finish()
    }
}

/// `api/` and `/api/` both become `/api`; `/` becomes empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
