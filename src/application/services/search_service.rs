//! Fuzzy search over the current catalog snapshot.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::Tool;
use crate::domain::repositories::CatalogRepository;
use crate::domain::search::{
    DEFAULT_THRESHOLD, FuzzySearchIndex, MAX_RESULTS, SearchField, normalize_query,
};
use crate::error::AppError;

/// An owned search hit.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredTool {
    pub tool: Tool,
    pub score: f64,
    #[serde(skip)]
    pub field: SearchField,
}

/// Builds a [`FuzzySearchIndex`] per query from a fresh catalog snapshot.
pub struct SearchService<R: CatalogRepository + ?Sized> {
    repository: Arc<R>,
    threshold: f64,
}

impl<R: CatalogRepository + ?Sized> SearchService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Overrides the fuzziness threshold (`SEARCH_THRESHOLD`).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Ranked matches for `query`, at most `limit` (capped at 10).
    ///
    /// The query is cut to [`crate::domain::search::MAX_QUERY_CHARS`] chars.
    /// Blank queries return an empty list without touching the store.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<ScoredTool>, AppError> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let tools = self.repository.list_tools(None).await?;
        let index = FuzzySearchIndex::build(tools)
            .with_threshold(self.threshold)
            .with_limit(limit.clamp(1, MAX_RESULTS));

        let hits = index.search(&query);
        tracing::debug!(query = %query, hits = hits.len(), "Fuzzy search");

        Ok(hits
            .into_iter()
            .map(|hit| ScoredTool {
                tool: hit.tool.clone(),
                score: hit.score,
                field: hit.field,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockCatalogRepository;

    fn catalog() -> Vec<Tool> {
        let mut revit = Tool::new("1", "revit", "Autodesk Revit", "bim-software");
        revit.description = "BIM for architecture".to_string();
        let mut tekla = Tool::new("2", "tekla", "Tekla Structures", "bim-software");
        tekla.description = "Structural BIM".to_string();
        vec![revit, tekla]
    }

    #[tokio::test]
    async fn test_search_with_typo() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_list_tools()
            .times(1)
            .returning(|_| Ok(catalog()));

        let service = SearchService::new(Arc::new(mock_repo));
        let results = service.search("revt", 10).await.unwrap();

        assert_eq!(results[0].tool.slug, "revit");
        assert_eq!(results[0].field, SearchField::Name);
    }

    #[tokio::test]
    async fn test_blank_query_skips_store() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_list_tools().times(0);

        let service = SearchService::new(Arc::new(mock_repo));
        assert!(service.search("  ", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_limit_is_applied() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_list_tools().returning(|_| Ok(catalog()));

        let service = SearchService::new(Arc::new(mock_repo));
        let results = service.search("bim", 1).await.unwrap();

        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_list_tools()
            .returning(|_| Err(AppError::internal("Database error", serde_json::json!({}))));

        let service = SearchService::new(Arc::new(mock_repo));
        let result = service.search("revit", 10).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_strict_threshold() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_list_tools().returning(|_| Ok(catalog()));

        let service = SearchService::new(Arc::new(mock_repo)).with_threshold(0.0);
        assert!(service.search("revt", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_query_is_cut() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_list_tools().returning(|_| Ok(catalog()));

        let service = SearchService::new(Arc::new(mock_repo));

        let flood = "tekla".repeat(20_000);
        assert!(service.search(&flood, 10).await.unwrap().is_empty());

        let padded = format!("Tekla{}", "\t".repeat(50_000));
        let results = service.search(&padded, 10).await.unwrap();
        assert_eq!(results[0].tool.slug, "tekla");
    }
}
