//! HTTP request handlers for the JSON API and site-wide endpoints.

pub mod categories;
pub mod health;
pub mod redirect;
pub mod search;
pub mod sitemap;
pub mod tools;

pub use categories::categories_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use search::search_handler;
pub use sitemap::sitemap_handler;
pub use tools::{get_tool_handler, list_tools_handler};
