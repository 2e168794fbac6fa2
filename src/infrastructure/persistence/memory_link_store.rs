//! In-process link store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreResult};

/// Link store backed by a `HashMap` behind an async lock.
///
/// Records are held already decoded; nothing survives a restart. Used for
/// development, the integration tests, and `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryLinkStore {
    records: RwLock<HashMap<String, LinkRecord>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>> {
        Ok(self.records.read().await.get(code).cloned())
    }

    async fn put(&self, record: &LinkRecord) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(record.code.clone(), record.clone());
        Ok(())
    }

    async fn insert_if_absent(&self, record: &LinkRecord) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.code) {
            return Ok(false);
        }
        records.insert(record.code.clone(), record.clone());
        Ok(true)
    }

    async fn replace_if_count(
        &self,
        record: &LinkRecord,
        expected_count: u64,
    ) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.code) {
            Some(current) if current.count == expected_count => {
                *current = record.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
