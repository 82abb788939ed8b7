//! End-to-end checkout flow: cart in, ledger record out, dashboards
//! consistent with what was recorded.

use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use store_server::analytics;
use store_server::checkout::{CheckoutService, PaymentGateway, PaymentSelection};
use store_server::ledger::TransactionFilter;
use store_server::{CheckoutError, CheckoutRequest, TransactionLedger};

use shared::{LineItem, ShippingAddress, TransactionStatus};
use tokio_util::sync::CancellationToken;

fn service(ledger: Arc<TransactionLedger>) -> CheckoutService {
    let gateway = PaymentGateway::new(Duration::from_millis(5), Duration::from_secs(1));
    CheckoutService::new(ledger, gateway, dec!(8), dec!(5.99))
}

fn widget_cart() -> Vec<LineItem> {
    vec![LineItem {
        catalog_item_id: "item-widget".to_string(),
        name: "Widget".to_string(),
        unit_price: dec!(10.00),
        quantity: 2,
        seller_id: "seller-acme".to_string(),
        seller_name: "Acme".to_string(),
    }]
}

fn request(card_number: &str) -> CheckoutRequest {
    CheckoutRequest {
        user_id: "u-100".to_string(),
        user_name: "Ada Buyer".to_string(),
        user_email: "ada@example.com".to_string(),
        items: widget_cart(),
        shipping_address: ShippingAddress {
            name: "Ada Buyer".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            country: "US".to_string(),
        },
        payment: PaymentSelection::CreditCard {
            number: card_number.to_string(),
            expiry: "12/30".to_string(),
            cvc: "123".to_string(),
        },
        idempotency_key: None,
    }
}

#[tokio::test]
async fn successful_checkout_flows_into_the_dashboards() {
    let ledger = Arc::new(TransactionLedger::new());
    let service = service(ledger.clone());

    let receipt = service
        .submit(request("4242424242424242"), &CancellationToken::new())
        .await
        .unwrap();

    // 20.00 subtotal + 5.99 shipping + 8% tax on the subtotal
    assert_eq!(receipt.amount, dec!(27.59));
    assert_eq!(receipt.status, TransactionStatus::Completed);

    // Ledger agrees with the receipt
    let recorded = ledger.get(&receipt.transaction_id).unwrap();
    assert_eq!(recorded.status, TransactionStatus::Completed);
    assert_eq!(recorded.amount, dec!(27.59));

    // Aggregates derive from the same record
    let snapshot = ledger.snapshot();
    assert_eq!(analytics::total_revenue(&snapshot, None), dec!(27.59));
    assert_eq!(analytics::unique_customer_count(&snapshot), 1);

    let sellers = analytics::top_sellers(&snapshot, 10);
    assert_eq!(sellers.len(), 1);
    assert_eq!(sellers[0].seller_id, "seller-acme");
    assert_eq!(sellers[0].units_sold, 2);
    assert_eq!(sellers[0].revenue, dec!(20.00));

    let products = analytics::top_products(&snapshot, 10);
    assert_eq!(products[0].catalog_item_id, "item-widget");
    assert_eq!(products[0].units_sold, 2);
}

#[tokio::test]
async fn duplicate_submission_settles_once() {
    let ledger = Arc::new(TransactionLedger::new());
    let service = service(ledger.clone());

    let mut req = request("4242424242424242");
    req.idempotency_key = Some("order-retry".to_string());

    let first = service
        .submit(req.clone(), &CancellationToken::new())
        .await
        .unwrap();
    let second = service
        .submit(req, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(first.transaction_id, second.transaction_id);
    assert_eq!(ledger.len(), 1);

    // Revenue counts the purchase exactly once
    let snapshot = ledger.snapshot();
    assert_eq!(analytics::total_revenue(&snapshot, None), dec!(27.59));
}

#[tokio::test]
async fn declined_card_is_recorded_but_earns_nothing() {
    let ledger = Arc::new(TransactionLedger::new());
    let service = service(ledger.clone());

    let receipt = service
        .submit(request("4000000000000002"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(receipt.status, TransactionStatus::Failed);

    // The attempt is visible in the admin table
    let failed = ledger.list(&TransactionFilter::any().with_status(TransactionStatus::Failed));
    assert_eq!(failed.len(), 1);

    // But contributes nothing to settled revenue or the rankings
    let snapshot = ledger.snapshot();
    assert_eq!(
        analytics::total_revenue(&snapshot, Some(TransactionStatus::Completed)),
        dec!(0)
    );
    let completed = ledger.list(&TransactionFilter::any().with_status(TransactionStatus::Completed));
    assert!(analytics::top_sellers(&completed, 10).is_empty());
}

#[tokio::test]
async fn gateway_timeout_leaves_no_trace() {
    let ledger = Arc::new(TransactionLedger::new());
    let gateway = PaymentGateway::new(Duration::from_secs(60), Duration::from_millis(5));
    let service = CheckoutService::new(ledger.clone(), gateway, dec!(8), dec!(5.99));

    let err = service
        .submit(request("4242424242424242"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::GatewayTimeout));
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn refund_reverses_revenue_going_forward() {
    let ledger = Arc::new(TransactionLedger::new());
    let service = service(ledger.clone());

    let receipt = service
        .submit(request("4242424242424242"), &CancellationToken::new())
        .await
        .unwrap();

    ledger
        .set_status(&receipt.transaction_id, TransactionStatus::Refunded)
        .unwrap();

    let snapshot = ledger.snapshot();
    assert_eq!(
        analytics::total_revenue(&snapshot, Some(TransactionStatus::Completed)),
        dec!(0)
    );
    assert_eq!(
        analytics::total_revenue(&snapshot, Some(TransactionStatus::Refunded)),
        dec!(27.59)
    );

    // The customer's completed spend also drops to zero
    let profile = analytics::customer_profile(&snapshot, "u-100").unwrap();
    assert_eq!(profile.total_spent, dec!(0));
    assert_eq!(profile.transaction_count, 1);
}
