//! Top-level router combining pages, the JSON API and service endpoints.
//!
//! # Route Structure
//!
//! - HTML pages             - see [`crate::web::routes::routes`]
//! - `GET /go/{slug}`       - Affiliate redirect
//! - `GET /health`          - Health check: store, cache, telemetry queue
//! - `GET /sitemap.xml`     - Sitemap
//! - `/api/*`               - Read-only JSON API
//! - `/static/*`            - Static assets
//!
//! Unknown paths render the HTML 404 page.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on form posts
//!
//! Trailing-slash normalization wraps this router in [`crate::server`].

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, sitemap_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::not_found_handler;
use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> Router {
    Router::new()
        .merge(web::routes::routes(behind_proxy))
        .route("/go/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .nest("/api", api::routes::routes())
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}
