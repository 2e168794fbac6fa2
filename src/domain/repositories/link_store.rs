//! Key-value store contract for link records.

use crate::domain::entities::LinkRecord;
use async_trait::async_trait;
use std::time::Duration;

/// How a store failure should be treated by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request-level failure; lookups degrade to the not-found outcome.
    Recoverable,
    /// Server-side failure; surfaced to the caller as an internal error.
    Fatal,
}

/// Errors reported by a [`LinkStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store rejected the request: {0}")]
    Rejected(String),

    #[error("stored record for '{code}' is unreadable: {reason}")]
    Corrupt { code: String, reason: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Rejected(_) | Self::Corrupt { .. } => Severity::Recoverable,
            Self::Unavailable(_) | Self::Timeout(_) => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Point-lookup store holding one serialized [`LinkRecord`] per code.
///
/// Implementations must be shareable across request tasks. The
/// serialization format is private to each backend.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - process-local map
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::RedisLinkStore`] - one Redis key per code
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetches the record stored under `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if no record exists
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value cannot be decoded,
    /// or a backend error carrying its [`Severity`].
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>>;

    /// Writes the full record under its code, replacing any previous value.
    ///
    /// Raw upsert for seeding and administration. Request handling never
    /// calls it: creation goes through [`LinkStore::insert_if_absent`] and
    /// hits through [`LinkStore::replace_if_count`].
    async fn put(&self, record: &LinkRecord) -> StoreResult<()>;

    /// Writes the record only if its code is not taken yet.
    ///
    /// Returns `Ok(false)` when another record already holds the code.
    async fn insert_if_absent(&self, record: &LinkRecord) -> StoreResult<bool>;

    /// Replaces the stored record only if its persisted `count` still equals
    /// `expected_count`.
    ///
    /// Returns `Ok(false)` when the record changed (or vanished) since it was
    /// read.
    async fn replace_if_count(&self, record: &LinkRecord, expected_count: u64)
    -> StoreResult<bool>;

    /// Reports whether the backend answers.
    async fn health_check(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            StoreError::Rejected("bad key".into()).severity(),
            Severity::Recoverable
        );
        assert_eq!(
            StoreError::Corrupt {
                code: "abc".into(),
                reason: "eof".into()
            }
            .severity(),
            Severity::Recoverable
        );
        assert!(StoreError::Unavailable("refused".into()).is_fatal());
        assert!(StoreError::Timeout(Duration::from_millis(5)).is_fatal());
    }
}
