//! Redis implementation of the link store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, Script, aio::ConnectionManager};
use std::sync::LazyLock;
use tracing::{debug, info};

use super::codec::{decode, encode};
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

/// Replaces `KEYS[1]` with `ARGV[2]` only if the stored record's `count`
/// equals `ARGV[1]`. Returns 1 on success, 0 otherwise.
static REPLACE_IF_COUNT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        local current = redis.call('GET', KEYS[1])
        if not current then
            return 0
        end
        local decoded = cjson.decode(current)
        if tonumber(decoded['count']) ~= tonumber(ARGV[1]) then
            return 0
        end
        redis.call('SET', KEYS[1], ARGV[2])
        return 1
        "#,
    )
});

/// Redis store keeping each record as a JSON string under `<namespace>:<code>`.
///
/// Uses `ConnectionManager` for automatic reconnection; cloning the manager
/// per call is cheap.
pub struct RedisLinkStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `namespace` - Key prefix separating this table from other data
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, namespace: &str) -> StoreResult<Self> {
        info!("Connecting to Redis link store");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: format!("{}:", namespace),
        })
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>> {
        let mut conn = self.client.clone();
        let raw: Option<String> = conn
            .get(self.build_key(code))
            .await
            .map_err(map_redis_error)?;

        raw.map(|raw| decode(code, &raw)).transpose()
    }

    async fn put(&self, record: &LinkRecord) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(self.build_key(&record.code), encode(record)?)
            .await
            .map_err(map_redis_error)
    }

    async fn insert_if_absent(&self, record: &LinkRecord) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        let inserted: bool = conn
            .set_nx(self.build_key(&record.code), encode(record)?)
            .await
            .map_err(map_redis_error)?;

        if !inserted {
            debug!("Code {} already taken", record.code);
        }
        Ok(inserted)
    }

    async fn replace_if_count(
        &self,
        record: &LinkRecord,
        expected_count: u64,
    ) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        let replaced: i64 = REPLACE_IF_COUNT
            .key(self.build_key(&record.code))
            .arg(expected_count)
            .arg(encode(record)?)
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(replaced == 1)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

/// Transport failures are fatal; errors answered by the server are not.
fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
    {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Rejected(e.to_string())
    }
}
