//! FieldKit ROI calculator.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;

use crate::web::forms::RoiParams;

#[derive(Template, WebTemplate)]
#[template(path = "roi.html")]
pub struct RoiTemplate {
    pub purchase_price: String,
    pub scans_per_month: String,
    pub avg_job_revenue: String,
    pub lifespan_years: String,
    pub monthly_revenue: String,
    pub break_even: String,
    pub annual_profit: String,
    pub profitable: bool,
    pub cost_per_project: String,
}

/// `GET /fieldkit/roi-calculator`. Renders the defaults when no inputs are given.
pub async fn roi_handler(Query(params): Query<RoiParams>) -> RoiTemplate {
    let input = params.to_input();
    let estimate = input.estimate();

    RoiTemplate {
        purchase_price: input.purchase_price.to_string(),
        scans_per_month: input.scans_per_month.to_string(),
        avg_job_revenue: input.avg_job_revenue.to_string(),
        lifespan_years: input.lifespan_years.to_string(),
        monthly_revenue: format!("${:.0}", estimate.monthly_revenue),
        break_even: match estimate.break_even_months {
            Some(1) => "1 month".to_string(),
            Some(months) => format!("{} months", months),
            None => "Never".to_string(),
        },
        annual_profit: format!("${}", estimate.annual_profit),
        profitable: estimate.annual_profit > 0,
        cost_per_project: estimate
            .cost_per_project
            .map(|c| format!("${:.2}", c))
            .unwrap_or_else(|| "n/a".to_string()),
    }
}
