//! Money calculation helpers
//!
//! All monetary math runs on `Decimal` and rounds to 2 decimal places
//! with the midpoint-away-from-zero strategy, so repeated pricing of
//! the same cart always lands on the same cent.

use super::CheckoutError;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::LineItem;

const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price per line item
const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Maximum allowed quantity per line item
const MAX_QUANTITY: i32 = 9999;

/// Round a monetary value to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate one cart line before pricing
pub fn validate_line(item: &LineItem) -> Result<(), CheckoutError> {
    if item.catalog_item_id.trim().is_empty() {
        return Err(CheckoutError::Validation(
            "line item is missing a catalog item id".to_string(),
        ));
    }
    if item.unit_price < Decimal::ZERO {
        return Err(CheckoutError::Validation(format!(
            "unit price must be non-negative, got {} for {}",
            item.unit_price, item.catalog_item_id
        )));
    }
    if item.unit_price > MAX_UNIT_PRICE {
        return Err(CheckoutError::Validation(format!(
            "unit price exceeds maximum allowed ({}), got {}",
            MAX_UNIT_PRICE, item.unit_price
        )));
    }
    if item.quantity <= 0 {
        return Err(CheckoutError::Validation(format!(
            "quantity must be positive, got {} for {}",
            item.quantity, item.catalog_item_id
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(CheckoutError::Validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, item.quantity
        )));
    }
    Ok(())
}

/// Priced cart breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CartPricing {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Price a cart: line totals, flat shipping, percentage tax on the
/// subtotal. Every component is rounded to the cent before summing.
pub fn price_cart(
    items: &[LineItem],
    tax_percent: Decimal,
    shipping_flat: Decimal,
) -> Result<CartPricing, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::Validation(
            "cart must contain at least one item".to_string(),
        ));
    }
    for item in items {
        validate_line(item)?;
    }

    let subtotal: Decimal = items.iter().map(|i| round_money(i.line_total())).sum();
    let shipping = round_money(shipping_flat);
    let tax = round_money(subtotal * tax_percent / Decimal::ONE_HUNDRED);
    let total = subtotal + shipping + tax;

    Ok(CartPricing {
        subtotal,
        shipping,
        tax,
        total,
    })
}
