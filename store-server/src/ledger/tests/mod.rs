use super::*;
use rust_decimal_macros::dec;
use shared::{LineItem, PaymentMethod, ShippingAddress};

// ========================================================================
// Shared helpers
// ========================================================================

fn make_line(item_id: &str, price: Decimal, quantity: i32, seller_id: &str) -> LineItem {
    LineItem {
        catalog_item_id: item_id.to_string(),
        name: format!("Item {}", item_id),
        unit_price: price,
        quantity,
        seller_id: seller_id.to_string(),
        seller_name: format!("Seller {}", seller_id),
    }
}

fn make_draft(user_id: &str, items: Vec<LineItem>) -> TransactionDraft {
    let amount: Decimal = items.iter().map(|i| i.line_total()).sum();
    TransactionDraft {
        user_id: user_id.to_string(),
        user_name: format!("User {}", user_id),
        user_email: format!("{}@example.com", user_id),
        amount,
        items,
        payment_method: PaymentMethod::card("4242"),
        shipping_address: test_address(),
    }
}

fn test_address() -> ShippingAddress {
    ShippingAddress {
        name: "Test Buyer".to_string(),
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
        country: "US".to_string(),
    }
}

fn simple_draft(user_id: &str) -> TransactionDraft {
    make_draft(user_id, vec![make_line("p1", dec!(10.00), 1, "s1")])
}
