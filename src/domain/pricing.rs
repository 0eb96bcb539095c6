//! Listing plans offered to tool vendors.

use serde::Serialize;

use crate::domain::entities::ListingPlan;

/// Billing period selected on the pricing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim() {
            "yearly" | "annual" => Self::Yearly,
            _ => Self::Monthly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A purchasable listing plan.
#[derive(Debug, Clone, Serialize)]
pub struct PricingPlan {
    pub id: ListingPlan,
    pub name: &'static str,
    pub description: &'static str,
    pub monthly_price: u32,
    pub yearly_price: u32,
    pub button_text: &'static str,
    pub popular: bool,
    pub features: &'static [&'static str],
    pub limitations: &'static [&'static str],
}

impl PricingPlan {
    pub fn price(&self, cycle: BillingCycle) -> u32 {
        match cycle {
            BillingCycle::Monthly => self.monthly_price,
            BillingCycle::Yearly => self.yearly_price,
        }
    }

    /// Amount saved per year by paying yearly.
    pub fn yearly_savings(&self) -> u32 {
        (self.monthly_price * 12).saturating_sub(self.yearly_price)
    }

    pub fn is_free(&self) -> bool {
        self.monthly_price == 0 && self.yearly_price == 0
    }
}

static PLANS: [PricingPlan; 3] = [
    PricingPlan {
        id: ListingPlan::Free,
        name: "Free Listing",
        description: "Get started with a basic listing",
        monthly_price: 0,
        yearly_price: 0,
        button_text: "Get Started Free",
        popular: false,
        features: &[
            "Basic tool listing",
            "Company information",
            "Contact details",
            "Category placement",
            "Basic search visibility",
            "Standard support",
        ],
        limitations: &[
            "No verification badge",
            "No sponsored placement",
            "Limited visibility",
            "No analytics dashboard",
        ],
    },
    PricingPlan {
        id: ListingPlan::Verified,
        name: "Verified Pro",
        description: "Build trust with verification",
        monthly_price: 29,
        yearly_price: 290,
        button_text: "Start Verified",
        popular: true,
        features: &[
            "Everything in Free",
            "Verified badge",
            "Priority search ranking",
            "Enhanced listing features",
            "Logo and screenshots",
            "Basic analytics dashboard",
            "Priority support",
            "Social media promotion",
        ],
        limitations: &[],
    },
    PricingPlan {
        id: ListingPlan::Sponsored,
        name: "Sponsored Elite",
        description: "Maximum visibility and features",
        monthly_price: 79,
        yearly_price: 790,
        button_text: "Go Elite",
        popular: false,
        features: &[
            "Everything in Verified Pro",
            "Sponsored placement",
            "Featured on homepage",
            "Top category positioning",
            "Advanced analytics",
            "Lead generation tools",
            "Custom CTA buttons",
            "Dedicated account manager",
            "Monthly performance reports",
            "Social media amplification",
        ],
        limitations: &[],
    },
];

/// All plans, cheapest first.
pub fn plans() -> &'static [PricingPlan] {
    &PLANS
}

pub fn find_plan(id: ListingPlan) -> &'static PricingPlan {
    // PLANS covers every ListingPlan variant.
    match id {
        ListingPlan::Free => &PLANS[0],
        ListingPlan::Verified => &PLANS[1],
        ListingPlan::Sponsored => &PLANS[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_prices() {
        let prices: Vec<(u32, u32)> = plans()
            .iter()
            .map(|p| (p.monthly_price, p.yearly_price))
            .collect();
        assert_eq!(prices, vec![(0, 0), (29, 290), (79, 790)]);
    }

    #[test]
    fn test_yearly_saves_two_months() {
        let verified = find_plan(ListingPlan::Verified);
        assert_eq!(verified.yearly_savings(), 58);
        assert_eq!(verified.price(BillingCycle::Yearly), 290);
        assert!(find_plan(ListingPlan::Free).is_free());
    }

    #[test]
    fn test_find_plan_matches_id() {
        for plan in plans() {
            assert_eq!(find_plan(plan.id).name, plan.name);
        }
    }

    #[test]
    fn test_billing_cycle_parse() {
        assert_eq!(BillingCycle::parse_or_default("yearly"), BillingCycle::Yearly);
        assert_eq!(BillingCycle::parse_or_default("weekly"), BillingCycle::Monthly);
    }
}
