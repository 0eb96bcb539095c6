//! HTML page route configuration.

use axum::{
    Router,
    handler::Handler,
    routing::{MethodRouter, get, post},
};

use crate::api::middleware::rate_limit;
use crate::state::AppState;
use crate::web::handlers::{
    categories_handler, category_handler, compare_add_handler, compare_clear_handler,
    compare_handler, compare_remove_handler, home_handler, pricing_handler, roi_handler,
    search_page_handler, submit_form_handler, submit_handler, tool_handler,
};

/// Public pages.
///
/// # Endpoints
///
/// - `GET /`                        - Home
/// - `GET /categories`              - Category index
/// - `GET /category/{slug}`         - Filterable category listing
/// - `GET /tool/{slug}`             - Tool detail
/// - `GET /compare`                 - Comparison table
/// - `POST /compare/{add,remove,clear}` - Selection changes (rate limited)
/// - `GET /search`                  - Search results
/// - `GET|POST /submit`             - Submission form (POST rate limited)
/// - `GET /pricing`                 - Listing plans
/// - `GET /fieldkit/roi-calculator` - ROI calculator
///
/// With `behind_proxy` the limiter keys on forwarded client addresses.
pub fn routes(behind_proxy: bool) -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/categories", get(categories_handler))
        .route("/category/{slug}", get(category_handler))
        .route("/tool/{slug}", get(tool_handler))
        .route("/compare", get(compare_handler))
        .route("/compare/add", limited_post(compare_add_handler, behind_proxy))
        .route("/compare/remove", limited_post(compare_remove_handler, behind_proxy))
        .route("/compare/clear", limited_post(compare_clear_handler, behind_proxy))
        .route("/search", get(search_page_handler))
        .route(
            "/submit",
            get(submit_form_handler).merge(limited_post(submit_handler, behind_proxy)),
        )
        .route("/pricing", get(pricing_handler))
        .route("/fieldkit/roi-calculator", get(roi_handler))
}

fn limited_post<H, T>(handler: H, behind_proxy: bool) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    let route = post(handler);
    if behind_proxy {
        route.layer(rate_limit::proxy_layer())
    } else {
        route.layer(rate_limit::layer())
    }
}
