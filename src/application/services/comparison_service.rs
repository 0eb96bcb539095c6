//! Resolves a comparison selection into full tool records.

use std::sync::Arc;

use crate::domain::entities::Tool;
use crate::domain::repositories::CatalogRepository;
use crate::error::AppError;

pub struct ComparisonService<R: CatalogRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CatalogRepository + ?Sized> ComparisonService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Looks up every slug in order. Slugs that no longer resolve are dropped.
    ///
    /// # Errors
    ///
    /// Store failures propagate; a missing tool is not an error.
    pub async fn resolve(&self, slugs: &[String]) -> Result<Vec<Tool>, AppError> {
        let mut tools = Vec::with_capacity(slugs.len());
        for slug in slugs {
            match self.repository.find_tool_by_slug(slug).await? {
                Some(tool) => tools.push(tool),
                None => tracing::debug!(slug = %slug, "Dropping unknown tool from comparison"),
            }
        }
        Ok(tools)
    }

    /// Tools that can still be added: everything not already selected, best rated first.
    pub async fn candidates(&self, selected: &[String], limit: usize) -> Result<Vec<Tool>, AppError> {
        let mut tools: Vec<Tool> = self
            .repository
            .list_tools(None)
            .await?
            .into_iter()
            .filter(|t| !selected.contains(&t.slug))
            .collect();
        tools.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        tools.truncate(limit);
        Ok(tools)
    }
}
