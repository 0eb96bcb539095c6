//! Return-on-investment estimate for capture hardware such as laser scanners.

use serde::{Deserialize, Serialize};

/// Calculator inputs. Non-finite or negative values are treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub purchase_price: f64,
    pub scans_per_month: f64,
    pub avg_job_revenue: f64,
    pub lifespan_years: f64,
}

impl Default for RoiInput {
    fn default() -> Self {
        Self {
            purchase_price: 10_000.0,
            scans_per_month: 4.0,
            avg_job_revenue: 1_500.0,
            lifespan_years: 3.0,
        }
    }
}

/// Calculator outputs. `None` means "never" / not applicable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiEstimate {
    pub monthly_revenue: f64,
    pub break_even_months: Option<u64>,
    pub annual_profit: i64,
    pub cost_per_project: Option<f64>,
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl RoiInput {
    pub fn estimate(&self) -> RoiEstimate {
        let price = sanitize(self.purchase_price);
        let scans = sanitize(self.scans_per_month);
        let revenue = sanitize(self.avg_job_revenue);
        let years = sanitize(self.lifespan_years);
        let amortization_years = if years > 0.0 { years } else { 1.0 };

        let monthly_revenue = scans * revenue;

        let break_even_months =
            (monthly_revenue > 0.0).then(|| (price / monthly_revenue).ceil() as u64);

        let annual_profit = (monthly_revenue * 12.0 - price / amortization_years).round() as i64;

        let projects_per_year = scans * 12.0;
        let cost_per_project = (projects_per_year > 0.0).then(|| {
            let cost = (price / amortization_years) / projects_per_year;
            (cost * 100.0).round() / 100.0
        });

        RoiEstimate {
            monthly_revenue,
            break_even_months,
            annual_profit,
            cost_per_project,
        }
    }
}
