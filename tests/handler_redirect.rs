mod common;

use blueprint_directory::domain::entities::LinkType;
use blueprint_directory::domain::telemetry::TelemetryEvent;

#[tokio::test]
async fn test_redirect_tags_affiliate_url() {
    let app = common::create_test_app();

    let response = app
        .server
        .get("/go/revit")
        .add_header("referer", "https://example.test/tool/revit")
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(
        response.header("location"),
        "https://partners.autodesk.com/revit?ref=1&utm_source=blueprint&utm_medium=referral&utm_campaign=revit"
    );
}

#[tokio::test]
async fn test_redirect_falls_back_to_website() {
    let app = common::create_test_app();

    let response = app.server.get("/go/archicad").await;

    assert_eq!(response.status_code(), 307);
    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("https://graphisoft.com/archicad?"));
    assert!(location.contains("utm_campaign=archicad"));
}

#[tokio::test]
async fn test_redirect_emits_click_event() {
    let app = common::create_test_app();

    app.server
        .get("/go/revit")
        .add_header("referer", "https://example.test/tool/revit")
        .add_header("user-agent", "test-agent")
        .await;

    assert_eq!(
        app.telemetry.events(),
        vec![TelemetryEvent::affiliate_clicked(
            "revit",
            LinkType::Affiliate,
            Some("https://example.test/tool/revit"),
            Some("test-agent"),
        )]
    );
}

#[tokio::test]
async fn test_redirect_unknown_slug() {
    let app = common::create_test_app();

    let response = app.server.get("/go/ghost").await;

    assert_eq!(response.status_code(), 404);
    assert!(app.telemetry.events().is_empty());
}
