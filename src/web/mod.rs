//! Server-rendered HTML pages.
//!
//! Uses Askama templates from `templates/`. Handlers build pre-formatted view
//! models so templates stay free of logic.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`compare_cookie`] - Cookie storage for the comparison selection
//! - [`forms`] - Form and query payloads
//! - [`views`] - Template view models
//! - [`routes`] - Page route configuration

pub mod compare_cookie;
pub mod forms;
pub mod handlers;
mod page_error;
pub mod routes;
pub mod views;

pub use page_error::{PageError, not_found_handler};
