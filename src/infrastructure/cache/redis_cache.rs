//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::Tool;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Namespaces tool entries so the database can be shared.
const KEY_PREFIX: &str = "blueprint:tool:";

/// Tool records stored as JSON under `blueprint:tool:<slug>` with a TTL.
///
/// Uses `ConnectionManager` for connection reuse. All operations are
/// fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_tool`] is called
    /// without a TTL (`CACHE_TTL_SECONDS`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Redis cache ready");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: KEY_PREFIX.to_string(),
        })
    }

    fn build_key(&self, slug: &str) -> String {
        format!("{}{}", self.key_prefix, slug)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_tool(&self, slug: &str) -> CacheResult<Option<Tool>> {
        let mut conn = self.client.clone();
        let cached: Option<String> = match conn.get(self.build_key(slug)).await {
            Ok(cached) => cached,
            Err(e) => {
                error!(slug, error = %e, "Redis GET failed");
                return Ok(None);
            }
        };

        let Some(json) = cached else {
            debug!(slug, "Tool cache miss");
            return Ok(None);
        };

        // Entries written by an older Tool layout decode as misses.
        match serde_json::from_str::<Tool>(&json) {
            Ok(tool) => {
                debug!(slug, "Tool cache hit");
                Ok(Some(tool))
            }
            Err(e) => {
                warn!(slug, error = %e, "Discarding undecodable tool cache entry");
                Ok(None)
            }
        }
    }

    async fn set_tool(&self, tool: &Tool, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let json = serde_json::to_string(tool)
            .map_err(|e| CacheError::OperationError(format!("Failed to encode tool: {}", e)))?;
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);
        let mut conn = self.client.clone();

        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.build_key(&tool.slug), json, ttl)
            .await
        {
            warn!(slug = %tool.slug, error = %e, "Redis SETEX failed");
        } else {
            debug!(slug = %tool.slug, ttl, "Tool cached");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
