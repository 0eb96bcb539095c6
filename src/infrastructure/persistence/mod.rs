//! Repository implementations.
//!
//! PostgreSQL repositories use SQLx runtime queries mapped through `FromRow`
//! row structs. The in-memory repositories back the server when no database
//! is configured and the handler tests.
//!
//! # Repositories
//!
//! - [`PgCatalogRepository`] / [`MemoryCatalogRepository`] - Tools and categories
//! - [`PgSubmissionRepository`] / [`MemorySubmissionRepository`] - Listing requests
//! - [`PgEventRepository`] / [`MemoryEventRepository`] - View and click log

pub mod memory_catalog_repository;
pub mod memory_event_repository;
pub mod memory_submission_repository;
pub mod pg_catalog_repository;
pub mod pg_event_repository;
pub mod pg_submission_repository;

pub use memory_catalog_repository::MemoryCatalogRepository;
pub use memory_event_repository::MemoryEventRepository;
pub use memory_submission_repository::MemorySubmissionRepository;
pub use pg_catalog_repository::PgCatalogRepository;
pub use pg_event_repository::PgEventRepository;
pub use pg_submission_repository::PgSubmissionRepository;
