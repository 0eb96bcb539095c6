//! Catalog browsing service: tools, categories, stats and the sitemap.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{Category, SiteStats, Tool};
use crate::domain::repositories::CatalogRepository;
use crate::domain::search::{SortStrategy, sort_tools};
use crate::error::AppError;

/// Static pages listed in the sitemap, with their priority.
const STATIC_PAGES: [(&str, f32, &str); 5] = [
    ("", 1.0, "daily"),
    ("/categories", 0.8, "weekly"),
    ("/compare", 0.5, "weekly"),
    ("/submit", 0.5, "monthly"),
    ("/pricing", 0.6, "monthly"),
];

/// One `<url>` entry of `sitemap.xml`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: &'static str,
    pub priority: f32,
}

/// Read access to the catalog with not-found mapping.
///
/// Generic over the repository so tests can plug in mocks; the server uses
/// `CatalogService<dyn CatalogRepository>`.
pub struct CatalogService<R: CatalogRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CatalogRepository + ?Sized> CatalogService<R> {
    /// Creates a new catalog service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists tools, optionally restricted to one category.
    pub async fn list_tools(&self, category_slug: Option<&str>) -> Result<Vec<Tool>, AppError> {
        self.repository
            .list_tools(category_slug.map(str::to_string))
            .await
    }

    /// Retrieves a tool by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no tool has this slug.
    pub async fn get_tool(&self, slug: &str) -> Result<Tool, AppError> {
        self.repository
            .find_tool_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Tool not found", json!({ "slug": slug })))
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.repository.list_categories().await
    }

    /// Retrieves a category by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no category has this slug.
    pub async fn get_category(&self, slug: &str) -> Result<Category, AppError> {
        self.repository
            .find_category_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "slug": slug })))
    }

    /// Top `limit` tools under the default (sponsored first) ordering.
    pub async fn featured_tools(&self, limit: usize) -> Result<Vec<Tool>, AppError> {
        let tools = self.repository.list_tools(None).await?;
        Ok(sort_tools(&tools, SortStrategy::Sponsored)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    /// Tools in the same category as `tool`, excluding it.
    pub async fn related_tools(&self, tool: &Tool, limit: usize) -> Result<Vec<Tool>, AppError> {
        let tools = self
            .repository
            .list_tools(Some(tool.category_slug.clone()))
            .await?;
        Ok(sort_tools(&tools, SortStrategy::Rating)
            .into_iter()
            .filter(|t| t.slug != tool.slug)
            .take(limit)
            .cloned()
            .collect())
    }

    pub async fn stats(&self) -> Result<SiteStats, AppError> {
        self.repository.stats().await
    }

    /// Builds sitemap entries: static pages, every category and every tool.
    pub async fn sitemap(&self, site_url: &str) -> Result<Vec<SitemapEntry>, AppError> {
        let base = site_url.trim_end_matches('/');
        let categories = self.repository.list_categories().await?;
        let tools = self.repository.list_tools(None).await?;

        let mut entries: Vec<SitemapEntry> = STATIC_PAGES
            .iter()
            .map(|&(path, priority, changefreq)| SitemapEntry {
                loc: format!("{}{}", base, path),
                changefreq,
                priority,
            })
            .collect();

        entries.extend(categories.iter().map(|c| SitemapEntry {
            loc: format!("{}/category/{}", base, c.slug),
            changefreq: "weekly",
            priority: 0.7,
        }));

        entries.extend(tools.iter().map(|t| SitemapEntry {
            loc: format!("{}/tool/{}", base, t.slug),
            changefreq: "weekly",
            priority: if t.sponsored { 0.8 } else { 0.6 },
        }));

        Ok(entries)
    }
}

/// Renders sitemap entries as XML.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.loc),
            entry.changefreq,
            entry.priority
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockCatalogRepository;

    fn tool(slug: &str, sponsored: bool, rating: f64) -> Tool {
        let mut t = Tool::new(slug, slug, slug.to_uppercase(), "bim-software");
        t.sponsored = sponsored;
        t.rating = rating;
        t
    }

    #[tokio::test]
    async fn test_get_tool_success() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_find_tool_by_slug()
            .withf(|slug| slug == "revit")
            .times(1)
            .returning(|_| Ok(Some(tool("revit", true, 4.5))));

        let service = CatalogService::new(Arc::new(mock_repo));
        let result = service.get_tool("revit").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().slug, "revit");
    }

    #[tokio::test]
    async fn test_get_tool_not_found() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_find_tool_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(mock_repo));
        let result = service.get_tool("ghost").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_category_not_found() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_find_category_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(mock_repo));
        let err = service.get_category("nope").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.details()["slug"], "nope");
    }

    #[tokio::test]
    async fn test_list_tools_passes_category() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_list_tools()
            .withf(|category| category.as_deref() == Some("drones"))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CatalogService::new(Arc::new(mock_repo));
        assert!(service.list_tools(Some("drones")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_featured_tools_sponsored_first() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_list_tools().times(1).returning(|_| {
            Ok(vec![
                tool("archicad", false, 4.3),
                tool("revit", true, 4.5),
                tool("tekla", false, 4.4),
            ])
        });

        let service = CatalogService::new(Arc::new(mock_repo));
        let featured = service.featured_tools(2).await.unwrap();
        let slugs: Vec<&str> = featured.iter().map(|t| t.slug.as_str()).collect();

        assert_eq!(slugs, vec!["revit", "tekla"]);
    }

    #[tokio::test]
    async fn test_related_tools_excludes_self() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_list_tools()
            .withf(|category| category.as_deref() == Some("bim-software"))
            .returning(|_| Ok(vec![tool("revit", true, 4.5), tool("tekla", false, 4.4)]));

        let service = CatalogService::new(Arc::new(mock_repo));
        let related = service
            .related_tools(&tool("revit", true, 4.5), 3)
            .await
            .unwrap();

        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "tekla");
    }

    #[tokio::test]
    async fn test_sitemap_lists_pages_categories_and_tools() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo
            .expect_list_categories()
            .returning(|| Ok(vec![Category::new("1", "BIM Software", "bim-software")]));
        mock_repo
            .expect_list_tools()
            .returning(|_| Ok(vec![tool("revit", true, 4.5)]));

        let service = CatalogService::new(Arc::new(mock_repo));
        let entries = service.sitemap("https://example.com/").await.unwrap();

        assert_eq!(entries.len(), STATIC_PAGES.len() + 2);
        assert_eq!(entries[0].loc, "https://example.com");
        assert!(
            entries
                .iter()
                .any(|e| e.loc == "https://example.com/category/bim-software")
        );
        assert!(entries.iter().any(|e| e.loc == "https://example.com/tool/revit"));
    }

    #[test]
    fn test_render_sitemap_escapes() {
        let xml = render_sitemap(&[SitemapEntry {
            loc: "https://example.com/?a=1&b=2".to_string(),
            changefreq: "daily",
            priority: 1.0,
        }]);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
