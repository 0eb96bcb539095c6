//! Business logic services for the application layer.
//!
//! Services are generic over their repository trait so unit tests can use
//! `mockall` mocks; the running server instantiates them over
//! `dyn Repository` trait objects.

pub mod catalog_service;
pub mod comparison_service;
pub mod search_service;
pub mod submission_service;

pub use catalog_service::{CatalogService, SitemapEntry, render_sitemap};
pub use comparison_service::ComparisonService;
pub use search_service::{ScoredTool, SearchService};
pub use submission_service::{SubmissionService, split_list};
