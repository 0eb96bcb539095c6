mod common;

use blueprint_directory::domain::telemetry::TelemetryEvent;

#[tokio::test]
async fn test_home_lists_categories_and_featured() {
    let app = common::create_test_app();

    let response = app.server.get("/").await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("BIM Software"));
    assert!(html.contains("Autodesk Revit"));
    assert!(html.contains("6 tools across 3 categories"));
}

#[tokio::test]
async fn test_categories_page_shows_counts() {
    let app = common::create_test_app();

    let response = app.server.get("/categories").await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("href=\"/category/drone-mapping\""));
    assert!(html.contains("3 tools"));
}

#[tokio::test]
async fn test_category_page_filters_by_pricing() {
    let app = common::create_test_app();

    let response = app
        .server
        .get("/category/bim-software")
        .add_query_param("pricing", "free")
        .await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("SketchUp Free"));
    assert!(!html.contains("Autodesk Revit"));
    assert!(html.contains("Showing 1 of 3 tools"));
    assert!(html.contains("Clear filters (1)"));
}

#[tokio::test]
async fn test_category_page_accepts_comma_separated_platforms() {
    let app = common::create_test_app();

    let response = app.server.get("/category/bim-software?platform=Mac,Web").await;

    let html = response.text();
    assert!(html.contains("ARCHICAD"));
    assert!(html.contains("SketchUp Free"));
    assert!(!html.contains("Autodesk Revit"));
    assert!(html.contains("Clear filters (2)"));
}

#[tokio::test]
async fn test_category_page_empty_state() {
    let app = common::create_test_app();

    let response = app
        .server
        .get("/category/bim-software")
        .add_query_param("q", "zzz_no_match")
        .await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("No tools match your filters."));
    assert!(html.contains("Showing 0 of 3 tools"));
}

#[tokio::test]
async fn test_category_page_list_view() {
    let app = common::create_test_app();

    let response = app.server.get("/category/bim-software?view=list").await;

    assert!(response.text().contains("class=\"tool-list\""));
}

#[tokio::test]
async fn test_unknown_category_renders_not_found_page() {
    let app = common::create_test_app();

    let response = app.server.get("/category/nope").await;

    assert_eq!(response.status_code(), 404);
    assert!(response.text().contains("Page not found"));
}

#[tokio::test]
async fn test_tool_page_emits_view_event() {
    let app = common::create_test_app();

    let response = app.server.get("/tool/revit").await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("Autodesk Revit"));
    assert!(html.contains("Join Program"));
    assert!(html.contains("href=\"/go/revit\""));
    // Related tools come from the same category.
    assert!(html.contains("ARCHICAD"));

    assert_eq!(
        app.telemetry.events(),
        vec![TelemetryEvent::viewed("revit")]
    );
}

#[tokio::test]
async fn test_unknown_tool_is_not_counted() {
    let app = common::create_test_app();

    let response = app.server.get("/tool/ghost").await;

    assert_eq!(response.status_code(), 404);
    assert!(app.telemetry.events().is_empty());
}

#[tokio::test]
async fn test_unknown_path_renders_not_found() {
    let app = common::create_test_app();

    let response = app.server.get("/does/not/exist").await;

    assert_eq!(response.status_code(), 404);
    assert!(response.text().contains("Page not found"));
}

#[tokio::test]
async fn test_search_page_tolerates_typos() {
    let app = common::create_test_app();

    let response = app.server.get("/search").add_query_param("q", "revt").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Autodesk Revit"));
}

#[tokio::test]
async fn test_search_page_blank_query() {
    let app = common::create_test_app();

    let response = app.server.get("/search").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Small typos are fine."));
}

#[tokio::test]
async fn test_pricing_page_yearly() {
    let app = common::create_test_app();

    let response = app.server.get("/pricing?billing=yearly").await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("Verified Pro"));
    assert!(html.contains("$290"));
    assert!(html.contains("Save $58 per year"));
}

#[tokio::test]
async fn test_roi_calculator_uses_inputs() {
    let app = common::create_test_app();

    let response = app
        .server
        .get("/fieldkit/roi-calculator?purchase_price=12000&scans_per_month=4&avg_job_revenue=1500&lifespan_years=")
        .await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("$6000"));
    assert!(html.contains("2 months"));
}

#[tokio::test]
async fn test_roi_calculator_zero_revenue_never_breaks_even() {
    let app = common::create_test_app();

    let response = app
        .server
        .get("/fieldkit/roi-calculator?scans_per_month=0")
        .await;

    assert!(response.text().contains("Never"));
}
