//! Tool submission entity for listing requests awaiting review.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Listing plan chosen on the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingPlan {
    #[default]
    Free,
    Verified,
    Sponsored,
}

impl ListingPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Verified => "verified",
            Self::Sponsored => "sponsored",
        }
    }
}

impl FromStr for ListingPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" => Ok(Self::Free),
            "verified" => Ok(Self::Verified),
            "sponsored" => Ok(Self::Sponsored),
            other => Err(format!("unknown plan '{}'", other)),
        }
    }
}

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown submission status '{}'", other)),
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: i64,
    pub tool_name: String,
    pub category: String,
    pub website_url: String,
    pub description: String,
    pub short_description: Option<String>,
    pub pricing_type: Option<String>,
    pub pricing_details: Option<String>,
    pub company_name: Option<String>,
    pub contact_email: String,
    pub platforms: Vec<String>,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub plan: ListingPlan,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Input data for a new submission. Always stored as `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub tool_name: String,
    pub category: String,
    pub website_url: String,
    pub description: String,
    pub short_description: Option<String>,
    pub pricing_type: Option<String>,
    pub pricing_details: Option<String>,
    pub company_name: Option<String>,
    pub contact_email: String,
    pub platforms: Vec<String>,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub plan: ListingPlan,
}

impl NewSubmission {
    /// Materializes the submission as a pending record.
    pub fn into_pending(self, id: i64, submitted_at: DateTime<Utc>) -> Submission {
        Submission {
            id,
            tool_name: self.tool_name,
            category: self.category,
            website_url: self.website_url,
            description: self.description,
            short_description: self.short_description,
            pricing_type: self.pricing_type,
            pricing_details: self.pricing_details,
            company_name: self.company_name,
            contact_email: self.contact_email,
            platforms: self.platforms,
            tags: self.tags,
            features: self.features,
            plan: self.plan,
            status: SubmissionStatus::Pending,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parse() {
        assert_eq!("verified".parse::<ListingPlan>(), Ok(ListingPlan::Verified));
        assert!("gold".parse::<ListingPlan>().is_err());
        assert_eq!(ListingPlan::default(), ListingPlan::Free);
    }

    #[test]
    fn test_status_round_trip_strings() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<SubmissionStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_into_pending() {
        let new = NewSubmission {
            tool_name: "SiteScan".to_string(),
            category: "Drone Mapping".to_string(),
            website_url: "https://sitescan.example.com".to_string(),
            description: "Drone flight planning and processing".to_string(),
            short_description: None,
            pricing_type: Some("paid".to_string()),
            pricing_details: None,
            company_name: None,
            contact_email: "team@example.com".to_string(),
            platforms: vec!["iOS".to_string()],
            tags: vec![],
            features: vec![],
            plan: ListingPlan::Sponsored,
        };

        let now = Utc::now();
        let submission = new.into_pending(3, now);

        assert_eq!(submission.id, 3);
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.plan, ListingPlan::Sponsored);
        assert_eq!(submission.submitted_at, now);
    }
}
