//! Shipping Address Model

use serde::{Deserialize, Serialize};

/// Shipping address captured at checkout
///
/// All fields are required and validated non-empty before a
/// transaction is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}
