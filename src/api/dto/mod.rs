//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization; listing parameters are parsed
//! by hand from the raw query string to support repeated keys.

pub mod browse;
pub mod categories;
pub mod health;
pub mod search;
pub mod tools;
