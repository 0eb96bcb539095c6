//! HTML page handlers.

pub mod categories;
pub mod compare;
mod home;
mod pricing;
mod roi;
mod search;
mod submit;
mod tool;

pub use categories::{categories_handler, category_handler};
pub use compare::{compare_add_handler, compare_clear_handler, compare_handler, compare_remove_handler};
pub use home::home_handler;
pub use pricing::pricing_handler;
pub use roi::roi_handler;
pub use search::search_page_handler;
pub use submit::{submit_form_handler, submit_handler};
pub use tool::tool_handler;
