//! Dashboard aggregates over the subscription and payment lists.

use indexmap::IndexMap;

use super::models::{Payment, Plan, Subscription};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Sum of all payment amounts, USD.
    pub total_revenue: f64,
    pub active_users: usize,
    pub total_users: usize,
    /// Subscriber count per plan, in order of first appearance.
    pub plan_counts: IndexMap<Plan, usize>,
}

impl DashboardStats {
    pub fn compute(subscriptions: &[Subscription], payments: &[Payment]) -> Self {
        let total_revenue = payments.iter().map(|p| p.total_amount_paid).sum();
        let active_users = subscriptions.iter().filter(|s| s.is_active).count();

        let mut plan_counts = IndexMap::new();
        for sub in subscriptions {
            *plan_counts.entry(sub.plan).or_insert(0) += 1;
        }

        Self {
            total_revenue,
            active_users,
            total_users: subscriptions.len(),
            plan_counts,
        }
    }

    pub fn plan_count(&self, plan: Plan) -> usize {
        self.plan_counts.get(&plan).copied().unwrap_or(0)
    }

    /// Percentage of all users on `plan`; 0 when there are no users.
    pub fn plan_share(&self, plan: Plan) -> f64 {
        if self.total_users == 0 {
            return 0.0;
        }
        self.plan_count(plan) as f64 / self.total_users as f64 * 100.0
    }
}
