//! Core domain entities representing the catalog data model.
//!
//! Entities are plain data structures. Store adapters map their native rows
//! onto these shapes at the boundary so nothing downstream sees raw records.
//!
//! # Entity Types
//!
//! - [`Tool`] - A catalog entry (software or hardware)
//! - [`Category`] - A grouping of tools
//! - [`Submission`] - A listing request awaiting review
//!
//! Creation inputs use separate structs (`NewSubmission`).

pub mod category;
pub mod submission;
pub mod tool;

pub use category::{Category, SiteStats};
pub use submission::{ListingPlan, NewSubmission, Submission, SubmissionStatus};
pub use tool::{LinkType, PricingType, Tool};
