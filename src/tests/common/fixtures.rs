//! Test Fixtures
//!
//! Builders for subscriptions and payments. Dates are derived from the id so
//! records sort predictably by date columns.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::models::{Payment, Plan, Subscription};

// =============================================================================
// Subscription Fixtures
// =============================================================================

/// Registration on day `id` of 2024, a one-year term starting a week later.
pub fn subscription(
    id: u32,
    username: &str,
    company: &str,
    plan: Plan,
    total_uploads: u32,
    uploads_used: u32,
    is_active: bool,
) -> Subscription {
    let registered = base_date() + Duration::days(i64::from(id));
    let start = registered + Duration::days(7);
    Subscription {
        id,
        username: username.to_string(),
        company_name: company.to_string(),
        registration_date: registered,
        plan,
        subscription_start_date: start,
        subscription_end_date: start + Duration::days(365),
        total_uploads,
        uploads_used,
        is_active,
    }
}

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

// =============================================================================
// Payment Fixtures
// =============================================================================

pub fn payment(id: u32, username: &str, company: &str, amount: f64) -> Payment {
    Payment {
        id,
        username: username.to_string(),
        company_name: company.to_string(),
        total_amount_paid: amount,
    }
}
