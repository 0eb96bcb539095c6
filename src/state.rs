//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    CatalogService, ComparisonService, SearchService, SubmissionService,
};
use crate::domain::comparison::DEFAULT_COMPARE_CAPACITY;
use crate::domain::repositories::{CatalogRepository, SubmissionRepository};
use crate::domain::telemetry::TelemetrySink;
use crate::infrastructure::cache::CacheService;

/// Public identity of the site, used in links, sitemaps and UTM tags.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Absolute base URL without a trailing slash.
    pub site_url: String,
    /// Value of `utm_source` on outbound links.
    pub site_name: String,
    pub compare_capacity: usize,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_url: "https://digitalblueprint.com".to_string(),
            site_name: "digitalblueprint".to_string(),
            compare_capacity: DEFAULT_COMPARE_CAPACITY,
        }
    }
}

/// Immutable, cheaply cloneable handles to every service.
///
/// The catalog store is constructed once in [`crate::server::run`] and shared
/// by the services through `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService<dyn CatalogRepository>>,
    pub search_service: Arc<SearchService<dyn CatalogRepository>>,
    pub comparison_service: Arc<ComparisonService<dyn CatalogRepository>>,
    pub submission_service: Arc<SubmissionService<dyn SubmissionRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub site: SiteSettings,
}

impl AppState {
    /// Wires the services over one catalog store and one submission store.
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        cache: Arc<dyn CacheService>,
        telemetry: Arc<dyn TelemetrySink>,
        site: SiteSettings,
        search_threshold: f64,
    ) -> Self {
        Self {
            catalog_service: Arc::new(CatalogService::new(catalog.clone())),
            search_service: Arc::new(
                SearchService::new(catalog.clone()).with_threshold(search_threshold),
            ),
            comparison_service: Arc::new(ComparisonService::new(catalog)),
            submission_service: Arc::new(SubmissionService::new(submissions)),
            cache,
            telemetry,
            site,
        }
    }
}
