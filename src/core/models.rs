//! Record types shown by the console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    Basic,
    Pro,
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Pro, Plan::Enterprise];

    pub fn label(self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Pro => "Pro",
            Plan::Enterprise => "Enterprise",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a subscription is currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 2] =
        [SubscriptionStatus::Active, SubscriptionStatus::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Inactive => "Inactive",
        }
    }

    /// Lowercase form matched by free-text search.
    pub fn search_text(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
        }
    }
}

/// A customer subscription.
///
/// `uploads_used <= total_uploads` is expected but not enforced; the
/// derived [`Subscription::uploads_left`] saturates at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: u32,
    pub username: String,
    pub company_name: String,
    pub registration_date: DateTime<Utc>,
    #[serde(rename = "subscriptionPlan")]
    pub plan: Plan,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: DateTime<Utc>,
    pub total_uploads: u32,
    pub uploads_used: u32,
    pub is_active: bool,
}

impl Subscription {
    pub fn uploads_left(&self) -> u32 {
        self.total_uploads.saturating_sub(self.uploads_used)
    }

    /// Share of the quota already consumed, in percent.
    pub fn usage_percent(&self) -> f64 {
        if self.total_uploads == 0 {
            return 100.0;
        }
        f64::from(self.uploads_used) / f64::from(self.total_uploads) * 100.0
    }

    pub fn status(&self) -> SubscriptionStatus {
        if self.is_active {
            SubscriptionStatus::Active
        } else {
            SubscriptionStatus::Inactive
        }
    }
}

/// Lifetime payment total for a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: u32,
    pub username: String,
    pub company_name: String,
    /// USD, never negative.
    pub total_amount_paid: f64,
}
