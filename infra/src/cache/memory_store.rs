//! Process-local code store
//!
//! Used with `CODE_STORE=memory` for development and by the facade tests.
//! Expired entries are evicted when they are read and swept on every write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use msg_core::domain::{Identifier, VerificationRecord};
use msg_core::errors::StoreError;
use msg_core::services::verification::CodeStore;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    record: VerificationRecord,
    expires_at: Instant,
}

/// In-memory code store with per-entry deadlines
#[derive(Debug, Clone, Default)]
pub struct InMemoryCodeStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included until the next read or write
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn get(&self, identifier: &Identifier) -> Result<Option<VerificationRecord>, StoreError> {
        let mut entries = self.lock();
        match entries.get(identifier.key()) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.record.clone())),
            Some(_) => {
                entries.remove(identifier.key());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        identifier: &Identifier,
        record: &VerificationRecord,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            identifier.key().to_string(),
            Entry {
                record: record.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, identifier: &Identifier) -> Result<(), StoreError> {
        self.lock().remove(identifier.key());
        Ok(())
    }
}
