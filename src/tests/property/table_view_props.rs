//! Property-based tests for the table view model
//!
//! Tests invariants:
//! - The view is a subset of the records and matches the predicate exactly
//! - Sorting is idempotent: re-sorting sorted rows keeps their order, ties included
//! - Flipping a sort twice restores the ascending order
//! - Uploads-left ordering follows `total - used`

use proptest::prelude::*;

use crate::core::models::{Payment, Plan, Subscription, SubscriptionStatus};
use crate::core::records::{
    PaymentColumn, PaymentTable, SubscriptionColumn, SubscriptionFilters, SubscriptionTable,
};
use crate::tests::common::fixtures::{payment, subscription};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_plan() -> impl Strategy<Value = Plan> {
    prop_oneof![Just(Plan::Basic), Just(Plan::Pro), Just(Plan::Enterprise)]
}

fn arb_status() -> impl Strategy<Value = Option<SubscriptionStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(SubscriptionStatus::Active)),
        Just(Some(SubscriptionStatus::Inactive)),
    ]
}

fn arb_column() -> impl Strategy<Value = SubscriptionColumn> {
    (0..SubscriptionColumn::ALL.len()).prop_map(|i| SubscriptionColumn::ALL[i])
}

/// Subscriptions with sequential ids and small alphabets so queries hit.
fn arb_subscriptions() -> impl Strategy<Value = Vec<Subscription>> {
    prop::collection::vec(
        (
            "[a-e]{1,6}",
            "[a-e ]{1,10}",
            arb_plan(),
            0u32..200,
            0u32..200,
            any::<bool>(),
        ),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (user, company, plan, total, used, active))| {
                subscription(i as u32 + 1, &user, &company, plan, total, used, active)
            })
            .collect()
    })
}

/// Tiny key spaces so most sort columns see duplicate values.
fn arb_tied_subscriptions() -> impl Strategy<Value = Vec<Subscription>> {
    prop::collection::vec(
        ("[ab]{1,2}", "[ab]{1,2}", arb_plan(), 0u32..4, 0u32..4, any::<bool>()),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (user, company, plan, total, used, active))| {
                subscription(i as u32 + 1, &user, &company, plan, total, used, active)
            })
            .collect()
    })
}

/// Payments whose amounts repeat often.
fn arb_tied_payments() -> impl Strategy<Value = Vec<Payment>> {
    prop::collection::vec(
        (
            "[ab]{1,2}",
            prop::sample::select(vec![0.0, 99.5, 250.0, 1200.0]),
        ),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (user, amount))| payment(i as u32 + 1, &user, "Acme", amount))
            .collect()
    })
}

fn ids(table: &SubscriptionTable) -> Vec<u32> {
    table.rows().map(|s| s.id).collect()
}

fn matches(sub: &Subscription, query: &str, filters: &SubscriptionFilters) -> bool {
    let q = query.to_lowercase();
    let text_hit = q.is_empty()
        || sub.username.to_lowercase().contains(&q)
        || sub.company_name.to_lowercase().contains(&q)
        || sub.plan.label().to_lowercase().contains(&q)
        || sub.status().search_text().contains(&q);
    text_hit
        && filters.plan.map_or(true, |p| sub.plan == p)
        && filters.status.map_or(true, |s| sub.status() == s)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: every shown row matches, and every matching record is shown
    #[test]
    fn prop_view_is_exact_filter(
        subs in arb_subscriptions(),
        query in "[a-eA-E]{0,3}",
        plan in prop::option::of(arb_plan()),
        status in arb_status(),
    ) {
        let filters = SubscriptionFilters { plan, status };
        let mut table = SubscriptionTable::with_filters(subs.clone(), filters);
        table.set_query(query.clone());

        let expected: Vec<u32> = subs
            .iter()
            .filter(|s| matches(s, &query, &filters))
            .map(|s| s.id)
            .collect();
        prop_assert_eq!(ids(&table), expected);
    }

    /// Property: sorting rows that are already sorted leaves them in place
    #[test]
    fn prop_sort_is_idempotent(subs in arb_tied_subscriptions(), column in arb_column()) {
        let mut table = SubscriptionTable::new(subs);
        table.request_sort(column);
        let first = ids(&table);

        let mut resorted = SubscriptionTable::new(table.rows().cloned().collect());
        resorted.request_sort(column);
        prop_assert_eq!(ids(&resorted), first);
    }

    /// Property: same for payments ordered by amount, where equal amounts are common
    #[test]
    fn prop_payment_sort_is_idempotent(payments in arb_tied_payments()) {
        let mut table = PaymentTable::new(payments);
        table.request_sort(PaymentColumn::AmountPaid);
        let first: Vec<u32> = table.rows().map(|p| p.id).collect();

        let mut resorted = PaymentTable::new(table.rows().cloned().collect());
        resorted.request_sort(PaymentColumn::AmountPaid);
        let second: Vec<u32> = resorted.rows().map(|p| p.id).collect();
        prop_assert_eq!(second, first);
    }

    /// Property: ascending → descending → ascending restores the first order
    #[test]
    fn prop_double_toggle_restores_order(subs in arb_subscriptions(), column in arb_column()) {
        let mut table = SubscriptionTable::new(subs);
        table.request_sort(column);
        let ascending = ids(&table);
        table.request_sort(column);
        table.request_sort(column);
        prop_assert_eq!(ids(&table), ascending);
    }

    /// Property: uploads-left ascending is non-decreasing in `total - used`
    #[test]
    fn prop_uploads_left_ordering(subs in arb_subscriptions()) {
        let mut table = SubscriptionTable::new(subs);
        table.request_sort(SubscriptionColumn::UploadsLeft);
        let left: Vec<i64> = table
            .rows()
            .map(|s| i64::from(s.total_uploads) - i64::from(s.uploads_used))
            .collect();
        prop_assert!(left.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Property: the view never contains more rows than the source
    #[test]
    fn prop_view_within_source(subs in arb_subscriptions(), query in "[a-e]{0,2}") {
        let len = subs.len();
        let mut table = SubscriptionTable::new(subs);
        table.set_query(query);
        prop_assert!(table.len() <= len);
        prop_assert_eq!(table.source_len(), len);
    }
}

#[test]
fn uploads_left_ranks_nearly_exhausted_first() {
    let mut table = SubscriptionTable::new(vec![
        subscription(1, "a", "A", Plan::Pro, 100, 10, true),
        subscription(2, "b", "B", Plan::Pro, 100, 90, true),
    ]);
    table.request_sort(SubscriptionColumn::UploadsLeft);
    assert_eq!(ids(&table), vec![2, 1]);
}
