//! Repository trait for read access to the tool catalog.

use crate::domain::entities::{Category, SiteStats, Tool};
use crate::error::AppError;
use async_trait::async_trait;

/// The Catalog Store: tools and categories, read-only for the engine.
///
/// Adapters map their native shape onto [`Tool`] / [`Category`] at the
/// boundary. A fetch either returns a complete list or an error; partial
/// results are never reported as success.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCatalogRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryCatalogRepository`] - JSON seed / tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Lists tools, optionally restricted to one category.
    ///
    /// Tools come back in store order (sponsored first, then rating).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable.
    async fn list_tools(&self, category_slug: Option<String>) -> Result<Vec<Tool>, AppError>;

    /// Finds a tool by slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Tool))` if found
    /// - `Ok(None)` if not found
    async fn find_tool_by_slug(&self, slug: &str) -> Result<Option<Tool>, AppError>;

    /// Lists all categories ordered by name, with their tool counts.
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    /// Finds a category by slug.
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError>;

    /// Increments the view counter of a tool.
    ///
    /// Returns `Ok(false)` when no tool has this slug.
    async fn increment_views(&self, slug: &str) -> Result<bool, AppError>;

    /// Aggregate catalog numbers.
    async fn stats(&self) -> Result<SiteStats, AppError>;
}
