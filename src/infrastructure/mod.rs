//! Adapters behind the domain traits.
//!
//! - [`cache`] - Tool record cache (Redis or none)
//! - [`persistence`] - PostgreSQL and in-memory repositories

pub mod cache;
pub mod persistence;
