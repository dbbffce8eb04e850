//! Property-based tests for dashboard aggregation
//!
//! Tests invariants:
//! - Active users never exceed total users
//! - Plan counts sum to total users
//! - Revenue equals the payment sum

use proptest::prelude::*;

use crate::core::models::{Payment, Plan, Subscription};
use crate::core::stats::DashboardStats;
use crate::tests::common::fixtures::{payment, subscription};

fn arb_plan() -> impl Strategy<Value = Plan> {
    prop_oneof![Just(Plan::Basic), Just(Plan::Pro), Just(Plan::Enterprise)]
}

fn arb_subscriptions() -> impl Strategy<Value = Vec<Subscription>> {
    prop::collection::vec((arb_plan(), any::<bool>()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (plan, active))| subscription(i as u32, "u", "C", plan, 10, 1, active))
            .collect()
    })
}

fn arb_payments() -> impl Strategy<Value = Vec<Payment>> {
    prop::collection::vec(0u32..100_000, 0..40).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, cents)| payment(i as u32, "u", "C", f64::from(cents) / 100.0))
            .collect()
    })
}

proptest! {
    /// Property: active ≤ total, and total is the record count
    #[test]
    fn prop_active_within_total(subs in arb_subscriptions()) {
        let stats = DashboardStats::compute(&subs, &[]);
        prop_assert_eq!(stats.total_users, subs.len());
        prop_assert!(stats.active_users <= stats.total_users);
    }

    /// Property: plan counts partition the users
    #[test]
    fn prop_plan_counts_sum(subs in arb_subscriptions()) {
        let stats = DashboardStats::compute(&subs, &[]);
        prop_assert_eq!(stats.plan_counts.values().sum::<usize>(), stats.total_users);
        let shares: f64 = Plan::ALL.iter().map(|&p| stats.plan_share(p)).sum();
        if stats.total_users > 0 {
            prop_assert!((shares - 100.0).abs() < 1e-6);
        } else {
            prop_assert_eq!(shares, 0.0);
        }
    }

    /// Property: revenue is the sum of payment amounts
    #[test]
    fn prop_revenue_is_sum(payments in arb_payments()) {
        let stats = DashboardStats::compute(&[], &payments);
        let expected: f64 = payments.iter().map(|p| p.total_amount_paid).sum();
        prop_assert!((stats.total_revenue - expected).abs() < 1e-9);
        prop_assert!(stats.total_revenue >= 0.0);
    }
}
