//! Redis-backed code store
//!
//! Each identifier maps to one key, `[prefix:]identifier`, holding the JSON
//! record `{"code": "...", "attempt": 0, "issuedAt": "..."}` with a TTL set by
//! `SET EX`. Every write replaces the record and restarts its TTL.

use std::time::Duration;

use async_trait::async_trait;
use msg_core::domain::{Identifier, VerificationRecord};
use msg_core::errors::StoreError;
use msg_core::services::verification::CodeStore;
use tracing::warn;

use crate::cache::{CacheConfig, RedisClient};
use crate::InfrastructureError;

/// Code store backed by Redis
#[derive(Clone)]
pub struct RedisCodeStore {
    /// Redis client for cache operations
    client: RedisClient,
    /// Key prefix and connection settings
    config: CacheConfig,
}

impl RedisCodeStore {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    /// Connect to Redis and build the store
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(&config).await?;
        Ok(Self::new(client, config))
    }

    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        self.client.health_check().await
    }

    fn key(&self, identifier: &Identifier) -> String {
        self.config.make_key(identifier.key())
    }
}

/// Encode a record as stored in Redis
pub(crate) fn encode_record(record: &VerificationRecord) -> Result<String, InfrastructureError> {
    Ok(serde_json::to_string(record)?)
}

/// Decode a stored value; undecodable values count as absent
pub(crate) fn decode_record(identifier: &Identifier, raw: &str) -> Option<VerificationRecord> {
    match serde_json::from_str(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(
                identifier = %identifier,
                error = %e,
                "Discarding undecodable verification record"
            );
            None
        }
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn get(&self, identifier: &Identifier) -> Result<Option<VerificationRecord>, StoreError> {
        let raw = self.client.get(&self.key(identifier)).await?;
        Ok(raw.and_then(|value| decode_record(identifier, &value)))
    }

    async fn put(
        &self,
        identifier: &Identifier,
        record: &VerificationRecord,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let value = encode_record(record)?;
        // SET EX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        self.client
            .set_with_expiry(&self.key(identifier), &value, seconds)
            .await?;
        Ok(())
    }

    async fn delete(&self, identifier: &Identifier) -> Result<(), StoreError> {
        self.client.delete(&self.key(identifier)).await?;
        Ok(())
    }
}
