//! In-memory catalog store seeded from a JSON document.
//!
//! Used when no database is configured and by handler tests. The seed has
//! the shape `{ "categories": [...], "tools": [...] }` with the camelCase
//! field names of [`Tool`] and [`Category`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::entities::{Category, SiteStats, Tool};
use crate::domain::repositories::CatalogRepository;
use crate::domain::search::{SortStrategy, sort_tools};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
struct CatalogSeed {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    tools: Vec<Tool>,
}

pub struct MemoryCatalogRepository {
    categories: Vec<Category>,
    tools: RwLock<Vec<Tool>>,
}

impl MemoryCatalogRepository {
    /// Builds the store, normalizing ratings and deriving category names and
    /// membership counts from the tools.
    pub fn new(categories: Vec<Category>, tools: Vec<Tool>) -> Self {
        let tools: Vec<Tool> = tools
            .into_iter()
            .map(|mut tool| {
                if tool.category.is_empty()
                    && let Some(c) = categories.iter().find(|c| c.slug == tool.category_slug)
                {
                    tool.category = c.name.clone();
                }
                tool.normalized()
            })
            .collect();

        let mut categories: Vec<Category> = categories
            .into_iter()
            .map(|mut c| {
                c.count = tools.iter().filter(|t| t.category_slug == c.slug).count() as u64;
                c
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            categories,
            tools: RwLock::new(tools),
        }
    }

    /// Parses a seed document.
    pub fn from_json(json: &str) -> Result<Self> {
        let seed: CatalogSeed = serde_json::from_str(json).context("Invalid catalog seed")?;
        Ok(Self::new(seed.categories, seed.tools))
    }

    /// Loads the seed file at `path`.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog seed {}", path.display()))?;
        let repo = Self::from_json(&raw)?;

        info!(
            path = %path.display(),
            categories = repo.categories.len(),
            "Loaded in-memory catalog"
        );
        Ok(repo)
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn list_tools(&self, category_slug: Option<String>) -> Result<Vec<Tool>, AppError> {
        let tools = self.tools.read().await;
        let selected = tools
            .iter()
            .filter(|t| category_slug.as_deref().is_none_or(|c| t.category_slug == c));

        Ok(sort_tools(selected, SortStrategy::Sponsored)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find_tool_by_slug(&self, slug: &str) -> Result<Option<Tool>, AppError> {
        let tools = self.tools.read().await;
        Ok(tools.iter().find(|t| t.slug == slug).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.categories.clone())
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError> {
        Ok(self.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn increment_views(&self, slug: &str) -> Result<bool, AppError> {
        let mut tools = self.tools.write().await;
        match tools.iter_mut().find(|t| t.slug == slug) {
            Some(tool) => {
                tool.views = tool.views.saturating_add(1);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn stats(&self) -> Result<SiteStats, AppError> {
        let tools = self.tools.read().await;
        Ok(SiteStats {
            total_tools: tools.len() as u64,
            total_categories: self.categories.len() as u64,
            total_views: tools.iter().map(|t| t.views).sum(),
        })
    }
}
