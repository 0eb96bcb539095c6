//! Listing plans page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;

use crate::domain::pricing::{BillingCycle, plans};

#[derive(Debug, Default, Deserialize)]
pub struct PricingQuery {
    #[serde(default)]
    pub billing: Option<String>,
}

/// One plan column, priced for the selected billing cycle.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub period: &'static str,
    pub savings: Option<u32>,
    pub button_text: &'static str,
    pub popular: bool,
    pub features: &'static [&'static str],
    pub limitations: &'static [&'static str],
}

#[derive(Template, WebTemplate)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub yearly: bool,
    pub plans: Vec<PlanView>,
}

/// `GET /pricing?billing=yearly`
pub async fn pricing_handler(Query(query): Query<PricingQuery>) -> PricingTemplate {
    let cycle = BillingCycle::parse_or_default(query.billing.as_deref().unwrap_or_default());
    let yearly = cycle == BillingCycle::Yearly;

    let plans = plans()
        .iter()
        .map(|p| PlanView {
            id: p.id.as_str(),
            name: p.name,
            description: p.description,
            price: p.price(cycle),
            period: if yearly { "year" } else { "month" },
            savings: (yearly && !p.is_free()).then(|| p.yearly_savings()),
            button_text: p.button_text,
            popular: p.popular,
            features: p.features,
            limitations: p.limitations,
        })
        .collect();

    PricingTemplate { yearly, plans }
}
