//! PostgreSQL implementation of the catalog repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Category, SiteStats, Tool};
use crate::domain::repositories::CatalogRepository;
use crate::error::AppError;

const TOOL_COLUMNS: &str = r#"
    t.id::text AS id,
    t.slug,
    t.name,
    t.tagline,
    t.description,
    t.short_description,
    c.name AS category,
    c.slug AS category_slug,
    t.logo_url,
    t.website,
    t.affiliate_url,
    t.link_type,
    t.pricing,
    t.pricing_type,
    t.commission,
    t.cookie_days,
    t.rating,
    t.review_count,
    t.views,
    t.verified,
    t.sponsored,
    t.created_at,
    ARRAY(
        SELECT p.name FROM tool_platforms tp
        JOIN platforms p ON p.id = tp.platform_id
        WHERE tp.tool_id = t.id
        ORDER BY p.name
    ) AS platforms,
    ARRAY(
        SELECT g.name FROM tool_tags tt
        JOIN tags g ON g.id = tt.tag_id
        WHERE tt.tool_id = t.id
        ORDER BY tt.position, g.name
    ) AS tags
"#;

/// Row shape of the tool queries, mapped onto [`Tool`] at the boundary.
#[derive(Debug, FromRow)]
struct ToolRow {
    id: String,
    slug: String,
    name: String,
    tagline: Option<String>,
    description: String,
    short_description: Option<String>,
    category: String,
    category_slug: String,
    logo_url: Option<String>,
    website: String,
    affiliate_url: Option<String>,
    link_type: String,
    pricing: String,
    pricing_type: Option<String>,
    commission: Option<String>,
    cookie_days: Option<String>,
    rating: f64,
    review_count: i32,
    views: i64,
    verified: bool,
    sponsored: bool,
    created_at: DateTime<Utc>,
    platforms: Vec<String>,
    tags: Vec<String>,
}

impl From<ToolRow> for Tool {
    fn from(row: ToolRow) -> Self {
        Tool {
            id: row.id,
            slug: row.slug,
            name: row.name,
            tagline: row.tagline,
            description: row.description,
            short_description: row.short_description,
            category: row.category,
            category_slug: row.category_slug,
            logo_url: row.logo_url,
            website: row.website,
            affiliate_url: row.affiliate_url,
            link_type: row.link_type.parse().unwrap_or_default(),
            pricing: row.pricing,
            pricing_type: row.pricing_type.and_then(|p| p.parse().ok()),
            commission: row.commission,
            cookie_days: row.cookie_days,
            rating: row.rating,
            review_count: u32::try_from(row.review_count).unwrap_or(0),
            views: u64::try_from(row.views).unwrap_or(0),
            platforms: row.platforms,
            tags: row.tags,
            verified: row.verified,
            sponsored: row.sponsored,
            created_at: Some(row.created_at),
        }
        .normalized()
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    slug: String,
    description: String,
    icon: Option<String>,
    color: Option<String>,
    count: i64,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            icon: row.icon,
            color: row.color,
            count: u64::try_from(row.count).unwrap_or(0),
        }
    }
}

const CATEGORY_QUERY: &str = r#"
    SELECT c.id::text AS id, c.name, c.slug, c.description, c.icon, c.color,
           COUNT(t.id) AS count
    FROM categories c
    LEFT JOIN tools t ON t.category_id = c.id
"#;

/// PostgreSQL catalog store.
///
/// Tools are joined with their category, platforms and tags in one query;
/// category counts are computed from actual membership.
pub struct PgCatalogRepository {
    pool: Arc<PgPool>,
}

impl PgCatalogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_tools(&self, category_slug: Option<String>) -> Result<Vec<Tool>, AppError> {
        let sql = format!(
            r#"
            SELECT {TOOL_COLUMNS}
            FROM tools t
            JOIN categories c ON c.id = t.category_id
            WHERE ($1::text IS NULL OR c.slug = $1)
            ORDER BY t.sponsored DESC, t.rating DESC, t.id
            "#
        );

        let rows = sqlx::query_as::<_, ToolRow>(&sql)
            .bind(category_slug)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Tool::from).collect())
    }

    async fn find_tool_by_slug(&self, slug: &str) -> Result<Option<Tool>, AppError> {
        let sql = format!(
            r#"
            SELECT {TOOL_COLUMNS}
            FROM tools t
            JOIN categories c ON c.id = t.category_id
            WHERE t.slug = $1
            "#
        );

        let row = sqlx::query_as::<_, ToolRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Tool::from))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let sql = format!("{CATEGORY_QUERY} GROUP BY c.id ORDER BY c.name");

        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError> {
        let sql = format!("{CATEGORY_QUERY} WHERE c.slug = $1 GROUP BY c.id");

        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Category::from))
    }

    async fn increment_views(&self, slug: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE tools SET views = views + 1 WHERE slug = $1")
            .bind(slug)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self) -> Result<SiteStats, AppError> {
        let (total_tools, total_categories, total_views): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM tools),
                (SELECT COUNT(*) FROM categories),
                (SELECT COALESCE(SUM(views), 0)::bigint FROM tools)
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(SiteStats {
            total_tools: u64::try_from(total_tools).unwrap_or(0),
            total_categories: u64::try_from(total_categories).unwrap_or(0),
            total_views: u64::try_from(total_views).unwrap_or(0),
        })
    }
}
