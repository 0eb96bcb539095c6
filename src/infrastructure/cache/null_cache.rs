//! Cache used when Redis is off.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::Tool;
use async_trait::async_trait;
use tracing::debug;

/// Stores nothing and always misses.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_tool(&self, _slug: &str) -> CacheResult<Option<Tool>> {
        Ok(None)
    }

    async fn set_tool(&self, _tool: &Tool, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
