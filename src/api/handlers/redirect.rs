//! Handler for outbound affiliate redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::domain::presentation::build_affiliate_url;
use crate::domain::telemetry::TelemetryEvent;
use crate::state::AppState;
use crate::web::PageError;

/// Sends the visitor to a tool's affiliate link, or its website when it has none.
///
/// # Endpoint
///
/// `GET /go/{slug}`
///
/// The target is tagged with `utm_source=<SITE_NAME>`, `utm_medium=referral`
/// and `utm_campaign=<slug>`. An `AffiliateClicked` event is emitted
/// fire-and-forget before the 307 redirect.
///
/// # Errors
///
/// Renders the HTML 404 page if the slug is unknown.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, PageError> {
    let tool = state.catalog_service.get_tool(&slug).await?;
    let target = build_affiliate_url(tool.outbound_url(), &state.site.site_name, &tool.slug);

    state.telemetry.emit(TelemetryEvent::affiliate_clicked(
        tool.slug.as_str(),
        tool.link_type,
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()),
    ));

    debug!(slug = %tool.slug, target = %target, "Affiliate redirect");
    Ok(Redirect::temporary(&target))
}
