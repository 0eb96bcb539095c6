#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use blueprint_directory::domain::telemetry::{TelemetryEvent, TelemetrySink};
use blueprint_directory::infrastructure::cache::NullCache;
use blueprint_directory::infrastructure::persistence::{
    MemoryCatalogRepository, MemorySubmissionRepository,
};
use blueprint_directory::routes::app_router;
use blueprint_directory::state::{AppState, SiteSettings};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::Layer;

pub const CATALOG: &str = r#"{
  "categories": [
    { "id": "1", "name": "BIM Software", "slug": "bim-software", "description": "Building Information Modeling tools" },
    { "id": "2", "name": "Drone Mapping", "slug": "drone-mapping", "description": "Aerial surveying" },
    { "id": "3", "name": "Estimating", "slug": "estimating", "description": "Cost estimation" }
  ],
  "tools": [
    {
      "id": "1", "slug": "revit", "name": "Autodesk Revit",
      "tagline": "BIM for architecture",
      "description": "Building information modeling for architects and engineers",
      "categorySlug": "bim-software",
      "website": "https://www.autodesk.com/products/revit",
      "affiliateUrl": "https://partners.autodesk.com/revit?ref=1",
      "linkType": "Affiliate", "commission": "10",
      "pricing": "$2,545/yr", "pricingType": "paid",
      "rating": 4.5, "reviewCount": 120, "views": 500,
      "platforms": ["Windows"], "tags": ["BIM", "Architecture"],
      "verified": true, "sponsored": true
    },
    {
      "id": "2", "slug": "archicad", "name": "ARCHICAD",
      "description": "Architectural BIM CAD for Mac and Windows",
      "categorySlug": "bim-software",
      "website": "https://graphisoft.com/archicad",
      "pricing": "$250/month", "pricingType": "paid",
      "rating": 4.3, "views": 300,
      "platforms": ["Windows", "Mac"], "tags": ["BIM"]
    },
    {
      "id": "3", "slug": "sketchup-free", "name": "SketchUp Free",
      "description": "3D modeling in the browser",
      "categorySlug": "bim-software",
      "website": "https://www.sketchup.com",
      "pricing": "Free", "pricingType": "free",
      "rating": 4.0, "views": 900,
      "platforms": ["Web"], "tags": ["3D Modeling"]
    },
    {
      "id": "4", "slug": "pix4d", "name": "Pix4D",
      "description": "Drone mapping and photogrammetry",
      "categorySlug": "drone-mapping",
      "website": "https://www.pix4d.com",
      "pricing": "From $350/month", "pricingType": "freemium",
      "rating": 4.4, "views": 200,
      "platforms": ["Windows", "Mac"], "tags": ["Photogrammetry"]
    },
    {
      "id": "5", "slug": "planswift", "name": "PlanSwift",
      "description": "Takeoff and estimating",
      "categorySlug": "estimating",
      "website": "https://www.planswift.com",
      "pricing": "$1,749/year", "pricingType": "paid",
      "rating": 4.1, "views": 100,
      "platforms": ["Windows"], "tags": ["Takeoff"]
    },
    {
      "id": "6", "slug": "dronedeploy", "name": "DroneDeploy",
      "description": "Cloud drone flights and site maps",
      "categorySlug": "drone-mapping",
      "website": "https://www.dronedeploy.com",
      "pricing": "$329/month", "pricingType": "freemium",
      "rating": 4.2, "views": 150,
      "platforms": ["Web", "iOS"], "tags": ["Drone"]
    }
  ]
}"#;

/// Telemetry sink that keeps every event for assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingSink {
    fn emit(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn is_open(&self) -> bool {
        true
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub telemetry: Arc<RecordingSink>,
    pub state: AppState,
}

pub fn create_test_state(compare_capacity: usize) -> (AppState, Arc<RecordingSink>) {
    let catalog = Arc::new(MemoryCatalogRepository::from_json(CATALOG).unwrap());
    let submissions = Arc::new(MemorySubmissionRepository::new());
    let telemetry = Arc::new(RecordingSink::default());

    let site = SiteSettings {
        site_url: "https://example.test".to_string(),
        site_name: "blueprint".to_string(),
        compare_capacity,
    };

    let state = AppState::new(
        catalog,
        submissions,
        Arc::new(NullCache::new()),
        telemetry.clone(),
        site,
        0.3,
    );

    (state, telemetry)
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_capacity(4)
}

pub fn create_test_app_with_capacity(compare_capacity: usize) -> TestApp {
    let (state, telemetry) = create_test_state(compare_capacity);
    let app: Router = app_router(state.clone(), false).layer(MockConnectInfoLayer);

    TestApp {
        server: TestServer::new(app).unwrap(),
        telemetry,
        state,
    }
}

/// `name=value` part of a `Set-Cookie` header, ready to send back as `Cookie`.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().trim().to_string()
}

pub async fn insert_category(pool: &PgPool, name: &str, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_tool(
    pool: &PgPool,
    category_id: i64,
    slug: &str,
    name: &str,
    rating: f64,
    sponsored: bool,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO tools (slug, name, description, category_id, website, pricing_type, rating, sponsored)
         VALUES ($1, $2, $3, $4, $5, 'paid', $6, $7) RETURNING id",
    )
    .bind(slug)
    .bind(name)
    .bind(format!("{} description", name))
    .bind(category_id)
    .bind(format!("https://{}.example.com", slug))
    .bind(rating)
    .bind(sponsored)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn attach_platform(pool: &PgPool, tool_id: i64, platform: &str) {
    let platform_id: i64 = sqlx::query_scalar(
        "INSERT INTO platforms (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
    )
    .bind(platform)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO tool_platforms (tool_id, platform_id) VALUES ($1, $2)")
        .bind(tool_id)
        .bind(platform_id)
        .execute(pool)
        .await
        .unwrap();
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
