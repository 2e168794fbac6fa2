//! Link creation and redirect resolution.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::domain::entities::{LinkRecord, NewLink, RedirectType};
use crate::domain::lifecycle::{self, Evaluation};
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved};
use crate::utils::validators::validate_code;

/// Read-evaluate-write rounds attempted before giving up on a contended link.
const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Tunables for [`LinkService`].
#[derive(Debug, Clone)]
pub struct LinkServiceOptions {
    /// Candidate codes tried before creation fails with
    /// [`AppError::CodeSpaceExhausted`].
    pub code_max_attempts: usize,
    /// Upper bound on every single store call.
    pub store_timeout: Duration,
}

impl Default for LinkServiceOptions {
    fn default() -> Self {
        Self {
            code_max_attempts: 10,
            store_timeout: Duration::from_secs(2),
        }
    }
}

/// Why a lookup ended on the generic not-found redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The code is not 1-22 alphanumerics; the store was not queried.
    InvalidCode,
    Missing,
    /// The link is `BURNT`.
    Inactive,
    /// The `EXPDATE` day has started.
    Expired,
    /// A recoverable store failure on read or write-back.
    StoreFault,
}

impl NotFoundReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCode => "invalid_code",
            Self::Missing => "missing",
            Self::Inactive => "inactive",
            Self::Expired => "expired",
            Self::StoreFault => "store_fault",
        }
    }
}

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Redirect to the link target. The hit has already been persisted.
    Redirect {
        location: String,
        redirect_type: RedirectType,
    },
    /// Redirect to the configured not-found page.
    NotFound(NotFoundReason),
}

impl Resolution {
    fn outcome(&self) -> &'static str {
        match self {
            Self::Redirect { .. } => "redirect",
            Self::NotFound(reason) => reason.as_str(),
        }
    }
}

/// Service owning the link lifecycle against a [`LinkStore`].
///
/// Stateless apart from the injected store handle, so one instance is shared
/// by all request tasks.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    options: LinkServiceOptions,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(store: Arc<dyn LinkStore>, options: LinkServiceOptions) -> Self {
        Self { store, options }
    }

    /// Persists a new link under a freshly generated code.
    ///
    /// # Code Generation
    ///
    /// Each candidate is looked up first and skipped if taken. Codes shadowed
    /// by fixed routes count as taken without a lookup. A free
    /// candidate is written with an insert-if-absent, so a concurrent
    /// creation that grabbed the same code also counts as a collision.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeSpaceExhausted`] after
    /// [`LinkServiceOptions::code_max_attempts`] collisions.
    /// Returns [`AppError::Store`] on any store failure; creation never
    /// degrades.
    pub async fn create_link(&self, new_link: NewLink) -> Result<LinkRecord, AppError> {
        let attempts = self.options.code_max_attempts;

        for attempt in 1..=attempts {
            let code = generate_code()
                .map_err(|e| AppError::internal(format!("Random source failed: {}", e)))?;

            if is_reserved(&code) {
                debug!("Reserved code {} skipped (attempt {})", code, attempt);
                continue;
            }

            if self.call(self.store.get(&code)).await?.is_some() {
                debug!("Code collision on {} (attempt {})", code, attempt);
                continue;
            }

            let record = LinkRecord::new(code, new_link.clone());
            if self.call(self.store.insert_if_absent(&record)).await? {
                info!(code = %record.code, mode = ?record.mode, "Link created");
                metrics::counter!("tinylink_links_created_total").increment(1);
                return Ok(record);
            }

            debug!(
                "Code {} taken concurrently (attempt {})",
                record.code, attempt
            );
        }

        warn!("Code generation exhausted after {} attempts", attempts);
        Err(AppError::CodeSpaceExhausted { attempts })
    }

    /// Fetches a record without touching its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on any store failure.
    pub async fn get_link(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self.call(self.store.get(code)).await?)
    }

    /// Resolves a short code, counting the hit when it redirects.
    ///
    /// # Request Flow
    ///
    /// 1. Reject codes that are not 1-22 alphanumerics
    /// 2. Read the record
    /// 3. Run [`lifecycle::evaluate`]
    /// 4. Write the mutated record back, conditioned on the count just read;
    ///    on conflict go back to 2
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] for fatal store failures and
    /// [`AppError::Internal`] if the record keeps changing under concurrent
    /// hits. Recoverable failures resolve to [`NotFoundReason::StoreFault`].
    #[instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        let resolution = self.resolve_inner(code).await?;

        debug!(outcome = resolution.outcome(), "Resolved");
        metrics::counter!("tinylink_resolutions_total", "outcome" => resolution.outcome())
            .increment(1);

        Ok(resolution)
    }

    /// Reports whether the store answers.
    pub async fn health_check(&self) -> bool {
        tokio::time::timeout(self.options.store_timeout, self.store.health_check())
            .await
            .unwrap_or(false)
    }

    async fn resolve_inner(&self, code: &str) -> Result<Resolution, AppError> {
        if !validate_code(code) {
            return Ok(Resolution::NotFound(NotFoundReason::InvalidCode));
        }

        for _ in 0..MAX_UPDATE_ATTEMPTS {
            let current = match self.call(self.store.get(code)).await {
                Ok(Some(record)) => record,
                Ok(None) => return Ok(Resolution::NotFound(NotFoundReason::Missing)),
                Err(e) => return degrade(code, e),
            };

            let (updated, burnt) = match lifecycle::evaluate(&current, Utc::now()) {
                Evaluation::Inactive => return Ok(Resolution::NotFound(NotFoundReason::Inactive)),
                Evaluation::Expired => return Ok(Resolution::NotFound(NotFoundReason::Expired)),
                Evaluation::Advance { record, burnt } => (record, burnt),
            };

            match self
                .call(self.store.replace_if_count(&updated, current.count))
                .await
            {
                Ok(true) => {
                    if burnt {
                        info!("Link {} burnt after {} hits", code, updated.count);
                    }
                    return Ok(Resolution::Redirect {
                        location: updated.original_url,
                        redirect_type: updated.redirect_type,
                    });
                }
                Ok(false) => debug!("Concurrent hit on {}, re-evaluating", code),
                Err(e) => return degrade(code, e),
            }
        }

        Err(AppError::internal(format!(
            "Link {} kept changing during update",
            code
        )))
    }

    /// Bounds a store call by the configured timeout.
    async fn call<T>(&self, fut: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        let limit = self.options.store_timeout;
        tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| StoreError::Timeout(limit))?
    }
}

/// Fatal faults propagate, recoverable ones become a not-found outcome.
fn degrade(code: &str, e: StoreError) -> Result<Resolution, AppError> {
    if e.is_fatal() {
        return Err(e.into());
    }
    warn!("Store fault while resolving {}: {}", code, e);
    Ok(Resolution::NotFound(NotFoundReason::StoreFault))
}
