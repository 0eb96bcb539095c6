//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CatalogRepository`] - Tools and categories (the Catalog Store)
//! - [`SubmissionRepository`] - Listing requests
//! - [`EventRepository`] - View and affiliate click log

pub mod catalog_repository;
pub mod event_repository;
pub mod submission_repository;

pub use catalog_repository::CatalogRepository;
pub use event_repository::EventRepository;
pub use submission_repository::SubmissionRepository;

#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use submission_repository::MockSubmissionRepository;
