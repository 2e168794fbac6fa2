//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};

use super::codec::{decode, encode};
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

/// PostgreSQL store keeping one row per code.
///
/// The table is a plain key-value layout: the record is stored as JSON text,
/// and `count` is duplicated into its own column so conditional updates can
/// compare it without parsing the record.
///
/// ```sql
/// CREATE TABLE "<table>" (
///     code   TEXT PRIMARY KEY,
///     record TEXT NOT NULL,
///     count  BIGINT NOT NULL DEFAULT 0
/// );
/// ```
pub struct PgLinkStore {
    pool: Arc<PgPool>,
    queries: Queries,
}

/// SQL text prepared once for the configured table name.
struct Queries {
    create_table: String,
    select: String,
    upsert: String,
    insert_if_absent: String,
    replace_if_count: String,
}

impl Queries {
    fn for_table(table: &str) -> Self {
        Self {
            create_table: format!(
                r#"CREATE TABLE IF NOT EXISTS "{table}" (
                    code TEXT PRIMARY KEY,
                    record TEXT NOT NULL,
                    count BIGINT NOT NULL DEFAULT 0
                )"#
            ),
            select: format!(r#"SELECT record FROM "{table}" WHERE code = $1"#),
            upsert: format!(
                r#"INSERT INTO "{table}" (code, record, count) VALUES ($1, $2, $3)
                   ON CONFLICT (code) DO UPDATE SET record = EXCLUDED.record, count = EXCLUDED.count"#
            ),
            insert_if_absent: format!(
                r#"INSERT INTO "{table}" (code, record, count) VALUES ($1, $2, $3)
                   ON CONFLICT (code) DO NOTHING"#
            ),
            replace_if_count: format!(
                r#"UPDATE "{table}" SET record = $2, count = $3 WHERE code = $1 AND count = $4"#
            ),
        }
    }
}

impl PgLinkStore {
    /// Creates a store over an existing pool.
    ///
    /// `table` must be a plain SQL identifier; [`crate::config::Config::validate`]
    /// enforces that for configured names.
    pub fn new(pool: Arc<PgPool>, table: &str) -> Self {
        Self {
            pool,
            queries: Queries::for_table(table),
        }
    }

    /// Creates the backing table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the DDL statement fails.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(&self.queries.create_table)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;
        info!("Link table ready");
        Ok(())
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>> {
        let row: Option<(String,)> = sqlx::query_as(&self.queries.select)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        row.map(|(raw,)| decode(code, &raw)).transpose()
    }

    async fn put(&self, record: &LinkRecord) -> StoreResult<()> {
        sqlx::query(&self.queries.upsert)
            .bind(&record.code)
            .bind(encode(record)?)
            .bind(count_column(record.count)?)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn insert_if_absent(&self, record: &LinkRecord) -> StoreResult<bool> {
        let result = sqlx::query(&self.queries.insert_if_absent)
            .bind(&record.code)
            .bind(encode(record)?)
            .bind(count_column(record.count)?)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            debug!("Code {} already taken", record.code);
        }
        Ok(result.rows_affected() == 1)
    }

    async fn replace_if_count(
        &self,
        record: &LinkRecord,
        expected_count: u64,
    ) -> StoreResult<bool> {
        let result = sqlx::query(&self.queries.replace_if_count)
            .bind(&record.code)
            .bind(encode(record)?)
            .bind(count_column(record.count)?)
            .bind(count_column(expected_count)?)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}

fn count_column(count: u64) -> StoreResult<i64> {
    i64::try_from(count).map_err(|_| StoreError::Rejected(format!("count {} out of range", count)))
}

/// Classifies SQLx failures by severity.
///
/// Connection-level problems are fatal; anything the server answered is a
/// request-level rejection.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    let fatal = matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    );

    if fatal {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Rejected(e.to_string())
    }
}
