use super::*;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use shared::{LineItem, PaymentMethod, ShippingAddress};

fn line(item_id: &str, price: Decimal, quantity: i32, seller_id: &str) -> LineItem {
    LineItem {
        catalog_item_id: item_id.to_string(),
        name: format!("Item {}", item_id),
        unit_price: price,
        quantity,
        seller_id: seller_id.to_string(),
        seller_name: format!("Seller {}", seller_id),
    }
}

fn tx(
    id: &str,
    user_id: &str,
    status: TransactionStatus,
    items: Vec<LineItem>,
    days_ago: i64,
) -> Transaction {
    let amount: Decimal = items.iter().map(|i| i.line_total()).sum();
    Transaction {
        id: id.to_string(),
        user_id: user_id.to_string(),
        user_name: format!("User {}", user_id),
        user_email: format!("{}@example.com", user_id),
        date: Utc::now() - Duration::days(days_ago),
        status,
        amount,
        items,
        payment_method: PaymentMethod::card("4242"),
        shipping_address: ShippingAddress::default(),
    }
}

fn fixture() -> Vec<Transaction> {
    vec![
        // alice: two completed purchases
        tx(
            "t1",
            "alice",
            TransactionStatus::Completed,
            vec![line("p1", dec!(10.00), 2, "s1")],
            5,
        ),
        tx(
            "t2",
            "alice",
            TransactionStatus::Completed,
            vec![
                line("p2", dec!(30.00), 1, "s2"),
                line("p1", dec!(10.00), 1, "s1"),
            ],
            3,
        ),
        // bob: one failed attempt, one refund
        tx(
            "t3",
            "bob",
            TransactionStatus::Failed,
            vec![line("p3", dec!(99.00), 1, "s2")],
            2,
        ),
        tx(
            "t4",
            "bob",
            TransactionStatus::Refunded,
            vec![line("p2", dec!(30.00), 2, "s2")],
            1,
        ),
        // carol: pending
        tx(
            "t5",
            "carol",
            TransactionStatus::Pending,
            vec![line("p1", dec!(10.00), 5, "s1")],
            0,
        ),
    ]
}

fn completed_only(txs: Vec<Transaction>) -> Vec<Transaction> {
    txs.into_iter()
        .filter(|tx| tx.status == TransactionStatus::Completed)
        .collect()
}

// ========================================================================
// Revenue
// ========================================================================

#[test]
fn total_revenue_sums_all_statuses_by_default() {
    let txs = fixture();
    // 20 + 40 + 99 + 60 + 50
    assert_eq!(total_revenue(&txs, None), dec!(269.00));
    assert_eq!(
        total_revenue(&txs, Some(TransactionStatus::Completed)),
        dec!(60.00)
    );
}

#[test]
fn total_revenue_with_explicit_status() {
    let txs = fixture();
    assert_eq!(
        total_revenue(&txs, Some(TransactionStatus::Refunded)),
        dec!(60.00)
    );
    assert_eq!(
        total_revenue(&txs, Some(TransactionStatus::Failed)),
        dec!(99.00)
    );
    assert_eq!(
        total_revenue(&txs, Some(TransactionStatus::Pending)),
        dec!(50.00)
    );
}

#[test]
fn total_revenue_on_empty_ledger_is_zero() {
    assert_eq!(total_revenue(&[], None), Decimal::ZERO);
}

// ========================================================================
// Seller rankings
// ========================================================================

#[test]
fn seller_revenue_projects_own_line_items_only() {
    let txs = completed_only(fixture());
    let stats = seller_revenue(&txs);

    // s1: 2x10 (t1) + 1x10 (t2) = 30.00, 3 units, 2 transactions
    let s1 = &stats["s1"];
    assert_eq!(s1.revenue, dec!(30.00));
    assert_eq!(s1.units_sold, 3);
    assert_eq!(s1.transaction_count, 2);

    // s2: 1x30 (t2)
    let s2 = &stats["s2"];
    assert_eq!(s2.revenue, dec!(30.00));
    assert_eq!(s2.units_sold, 1);
    assert_eq!(s2.transaction_count, 1);
}

#[test]
fn seller_revenue_folds_every_transaction_it_is_given() {
    // Status inclusion is the caller's choice; unfiltered input counts
    // failed and refunded money too
    let stats = seller_revenue(&fixture());

    // s2: 1x30 (t2) + 1x99 (t3) + 2x30 (t4)
    let s2 = &stats["s2"];
    assert_eq!(s2.revenue, dec!(189.00));
    assert_eq!(s2.transaction_count, 3);
}

#[test]
fn seller_revenue_sums_match_line_totals() {
    let txs = completed_only(fixture());
    let from_sellers: Decimal = seller_revenue(&txs).values().map(|s| s.revenue).sum();
    let from_lines: Decimal = txs
        .iter()
        .flat_map(|tx| tx.items.iter())
        .map(|i| i.line_total())
        .sum();
    assert_eq!(from_sellers, from_lines);
}

#[test]
fn top_sellers_ranks_by_revenue_with_id_tiebreak() {
    // Both sellers end at 30.00; s1 wins the tie on id
    let ranked = top_sellers(&completed_only(fixture()), 10);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].seller_id, "s1");
    assert_eq!(ranked[1].seller_id, "s2");
}

#[test]
fn top_sellers_respects_the_limit() {
    let ranked = top_sellers(&completed_only(fixture()), 1);
    assert_eq!(ranked.len(), 1);
}

#[test]
fn seller_rows_answer_search_and_pagination() {
    let rows = seller_rows(&completed_only(fixture()));

    let spec = shared::QuerySpec::new(10).with_search("s2");
    let page = crate::query::evaluate(&rows, &spec);
    assert_eq!(page.total_matched, 1);
    assert_eq!(page.items[0].seller_id, "s2");

    // Without a sort key the revenue ranking survives pagination
    let all = crate::query::evaluate(&rows, &shared::QuerySpec::new(1));
    assert_eq!(all.items[0].seller_id, "s1");
    assert_eq!(all.total_pages, 2);
}

// ========================================================================
// Product rankings
// ========================================================================

#[test]
fn top_products_ranks_by_units_with_id_tiebreak() {
    let txs = vec![
        tx(
            "t1",
            "alice",
            TransactionStatus::Completed,
            vec![line("pa", dec!(5.00), 2, "s1"), line("pb", dec!(9.00), 2, "s1")],
            1,
        ),
        tx(
            "t2",
            "bob",
            TransactionStatus::Completed,
            vec![line("pc", dec!(1.00), 7, "s1")],
            0,
        ),
    ];

    let ranked = top_products(&txs, 10);
    assert_eq!(ranked[0].catalog_item_id, "pc");
    // pa and pb tie at 2 units; pa wins on id
    assert_eq!(ranked[1].catalog_item_id, "pa");
    assert_eq!(ranked[2].catalog_item_id, "pb");
}

#[test]
fn product_sales_respect_the_caller_supplied_slice() {
    let stats = product_sales(&completed_only(fixture()));
    // p3 only appears in a failed transaction
    assert!(!stats.contains_key("p3"));
    // p1: 2 (t1) + 1 (t2); pending t5 was filtered out
    assert_eq!(stats["p1"].units_sold, 3);

    // Unfiltered input counts everything
    let all = product_sales(&fixture());
    assert_eq!(all["p3"].units_sold, 1);
    assert_eq!(all["p1"].units_sold, 8);
}

// ========================================================================
// Customers
// ========================================================================

#[test]
fn unique_customers_span_all_statuses() {
    assert_eq!(unique_customer_count(&fixture()), 3);
}

#[test]
fn customer_profile_rolls_up_history() {
    let txs = fixture();

    let alice = customer_profile(&txs, "alice").unwrap();
    assert_eq!(alice.transaction_count, 2);
    assert_eq!(alice.total_spent, dec!(60.00));

    // bob never completed anything; spend is zero but history remains
    let bob = customer_profile(&txs, "bob").unwrap();
    assert_eq!(bob.transaction_count, 2);
    assert_eq!(bob.total_spent, Decimal::ZERO);

    assert!(customer_profile(&txs, "nobody").is_none());
}

#[test]
fn profile_takes_name_and_email_from_most_recent_transaction() {
    let mut first = tx(
        "t1",
        "dana",
        TransactionStatus::Completed,
        vec![line("p1", dec!(10.00), 1, "s1")],
        10,
    );
    first.user_email = "old@example.com".to_string();
    let mut second = tx(
        "t2",
        "dana",
        TransactionStatus::Pending,
        vec![line("p1", dec!(10.00), 1, "s1")],
        1,
    );
    second.user_email = "new@example.com".to_string();

    let profile = customer_profile(&[first, second], "dana").unwrap();
    assert_eq!(profile.user_email, "new@example.com");
    assert_eq!(profile.total_spent, dec!(10.00));
}

#[test]
fn profiles_are_ordered_most_recent_first() {
    let rows = customer_profiles(&fixture());
    assert_eq!(rows[0].user_id, "carol");
    assert_eq!(rows[1].user_id, "bob");
    assert_eq!(rows[2].user_id, "alice");
}

// ========================================================================
// Overview
// ========================================================================

#[test]
fn overview_is_internally_consistent() {
    let txs = fixture();
    let view = overview(&txs);

    // Top line sums every status; AOV covers settled money only
    assert_eq!(view.total_revenue, dec!(269.00));
    assert_eq!(view.transaction_count, 5);
    assert_eq!(view.completed_count, 2);
    assert_eq!(view.unique_customers, 3);
    assert_eq!(view.average_order_value, dec!(30.00));
}

#[test]
fn overview_of_empty_ledger() {
    let view = overview(&[]);
    assert_eq!(view.total_revenue, Decimal::ZERO);
    assert_eq!(view.average_order_value, Decimal::ZERO);
    assert_eq!(view.unique_customers, 0);
}
