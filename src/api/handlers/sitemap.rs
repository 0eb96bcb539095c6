//! Handler for the XML sitemap.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::application::services::render_sitemap;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /sitemap.xml`: static pages, every category and every tool.
pub async fn sitemap_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries = state.catalog_service.sitemap(&state.site.site_url).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&entries),
    ))
}
