//! Tool cache contract.

use async_trait::async_trait;

use crate::domain::entities::Tool;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of tool records keyed by slug.
///
/// Backends fail open: a broken backend is logged and behaves like a
/// permanent miss, so callers fall back to the catalog store. Entries expire
/// by TTL only, so view counts in a cached record may lag by up to one TTL.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached tool, `Ok(None)` on a miss or backend error.
    async fn get_tool(&self, slug: &str) -> CacheResult<Option<Tool>>;

    /// Stores a tool with an optional TTL in seconds (backend default if `None`).
    async fn set_tool(&self, tool: &Tool, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
