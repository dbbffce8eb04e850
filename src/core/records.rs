//! Table bindings for subscriptions and payments.

use std::cmp::Ordering;

use super::models::{Payment, Plan, Subscription, SubscriptionStatus};
use super::table::{RecordFilter, TableRecord, TableView};

pub type SubscriptionTable = TableView<Subscription, SubscriptionFilters>;
pub type PaymentTable = TableView<Payment>;

// ── Subscriptions ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionColumn {
    Username,
    Company,
    Registered,
    Plan,
    Status,
    Start,
    End,
    /// Sorted by `total - used`, not by the raw used count.
    UploadsLeft,
}

impl SubscriptionColumn {
    pub const ALL: [SubscriptionColumn; 8] = [
        SubscriptionColumn::Username,
        SubscriptionColumn::Company,
        SubscriptionColumn::Registered,
        SubscriptionColumn::Plan,
        SubscriptionColumn::Status,
        SubscriptionColumn::Start,
        SubscriptionColumn::End,
        SubscriptionColumn::UploadsLeft,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionColumn::Username => "Username",
            SubscriptionColumn::Company => "Company Name",
            SubscriptionColumn::Registered => "Registration Date",
            SubscriptionColumn::Plan => "Subscription Plan",
            SubscriptionColumn::Status => "Status",
            SubscriptionColumn::Start => "Start Date",
            SubscriptionColumn::End => "End Date",
            SubscriptionColumn::UploadsLeft => "Uploads Left",
        }
    }
}

impl TableRecord for Subscription {
    type Column = SubscriptionColumn;

    fn matches_query(&self, query: &str) -> bool {
        self.username.to_lowercase().contains(query)
            || self.company_name.to_lowercase().contains(query)
            || self.plan.label().to_lowercase().contains(query)
            || self.status().search_text().contains(query)
    }

    fn compare_by(&self, other: &Self, column: SubscriptionColumn) -> Ordering {
        match column {
            SubscriptionColumn::Username => self.username.cmp(&other.username),
            SubscriptionColumn::Company => self.company_name.cmp(&other.company_name),
            SubscriptionColumn::Registered => self.registration_date.cmp(&other.registration_date),
            SubscriptionColumn::Plan => self.plan.label().cmp(other.plan.label()),
            SubscriptionColumn::Status => self.is_active.cmp(&other.is_active),
            SubscriptionColumn::Start => self
                .subscription_start_date
                .cmp(&other.subscription_start_date),
            SubscriptionColumn::End => self.subscription_end_date.cmp(&other.subscription_end_date),
            SubscriptionColumn::UploadsLeft => {
                remaining(self).cmp(&remaining(other))
            }
        }
    }
}

/// Signed so over-quota records still order below exhausted ones.
fn remaining(sub: &Subscription) -> i64 {
    i64::from(sub.total_uploads) - i64::from(sub.uploads_used)
}

/// Plan and status dropdowns. `None` means "All".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionFilters {
    pub plan: Option<Plan>,
    pub status: Option<SubscriptionStatus>,
}

impl SubscriptionFilters {
    /// All → Basic → Pro → Enterprise → All.
    pub fn cycle_plan(&mut self) {
        self.plan = match self.plan {
            None => Some(Plan::Basic),
            Some(Plan::Basic) => Some(Plan::Pro),
            Some(Plan::Pro) => Some(Plan::Enterprise),
            Some(Plan::Enterprise) => None,
        };
    }

    /// All → Active → Inactive → All.
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(SubscriptionStatus::Active),
            Some(SubscriptionStatus::Active) => Some(SubscriptionStatus::Inactive),
            Some(SubscriptionStatus::Inactive) => None,
        };
    }

    pub fn plan_label(&self) -> &'static str {
        self.plan.map_or("All Plans", Plan::label)
    }

    pub fn status_label(&self) -> &'static str {
        self.status.map_or("All Statuses", SubscriptionStatus::label)
    }
}

impl RecordFilter<Subscription> for SubscriptionFilters {
    fn admits(&self, record: &Subscription) -> bool {
        self.plan.map_or(true, |plan| record.plan == plan)
            && self.status.map_or(true, |status| record.status() == status)
    }
}

impl SubscriptionTable {
    /// Flip the active flag of subscription `id`. Returns the new flag.
    pub fn toggle_active(&mut self, id: u32) -> Option<bool> {
        let mut flag = None;
        self.update_where(
            |sub| sub.id == id,
            |sub| {
                sub.is_active = !sub.is_active;
                flag = Some(sub.is_active);
            },
        );
        flag
    }
}

// ── Payments ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentColumn {
    Username,
    Company,
    AmountPaid,
}

impl PaymentColumn {
    pub const ALL: [PaymentColumn; 3] = [
        PaymentColumn::Username,
        PaymentColumn::Company,
        PaymentColumn::AmountPaid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentColumn::Username => "Username",
            PaymentColumn::Company => "Company Name",
            PaymentColumn::AmountPaid => "Total Amount Paid",
        }
    }
}

impl TableRecord for Payment {
    type Column = PaymentColumn;

    fn matches_query(&self, query: &str) -> bool {
        self.username.to_lowercase().contains(query)
            || self.company_name.to_lowercase().contains(query)
    }

    fn compare_by(&self, other: &Self, column: PaymentColumn) -> Ordering {
        match column {
            PaymentColumn::Username => self.username.cmp(&other.username),
            PaymentColumn::Company => self.company_name.cmp(&other.company_name),
            PaymentColumn::AmountPaid => self.total_amount_paid.total_cmp(&other.total_amount_paid),
        }
    }
}
