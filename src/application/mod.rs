//! Application layer: services and the listing view controller.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::CatalogService`] - Tool and category lookups, stats, sitemap
//! - [`services::SearchService`] - Fuzzy search over the catalog
//! - [`services::ComparisonService`] - Comparison selection resolution
//! - [`services::SubmissionService`] - Tool submission intake and review
//!
//! [`view_controller::ViewController`] drives the category and browse pages.

pub mod services;
pub mod view_controller;
