//! Code store configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Backend holding verification records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Redis with per-key TTL (production)
    #[default]
    Redis,
    /// Process-local map (development and tests)
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid code store backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Which store implementation to build
    #[serde(default)]
    pub backend: StoreBackend,

    /// Redis connection URL
    pub url: String,

    /// Optional cache key prefix; keys are the bare identifier when unset
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Maximum retry attempts for transient Redis failures
    pub max_retries: u32,

    /// Base delay between retries (exponential backoff)
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: String::from("redis://localhost:6379"),
            key_prefix: None,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_string("CODE_STORE")
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.backend),
            url: env_string("REDIS_URL").unwrap_or(defaults.url),
            key_prefix: env_string("REDIS_KEY_PREFIX"),
            max_retries: env_parse("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_parse("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}
