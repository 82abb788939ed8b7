//! Payment Method Model

use serde::{Deserialize, Serialize};

/// Supported payment method kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    CreditCard,
    Paypal,
}

impl std::fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethodKind::CreditCard => write!(f, "credit_card"),
            PaymentMethodKind::Paypal => write!(f, "paypal"),
        }
    }
}

/// Normalized payment method stored on a transaction
///
/// Holds the method kind and, for cards, the last four digits only.
/// The full card number, expiry, and CVC never survive validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    /// Last four digits, present only for `credit_card`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,
}

impl PaymentMethod {
    /// A card method carrying its last four digits
    pub fn card(last_four: impl Into<String>) -> Self {
        Self {
            kind: PaymentMethodKind::CreditCard,
            last_four: Some(last_four.into()),
        }
    }

    /// A PayPal method (no sensitive fields)
    pub fn paypal() -> Self {
        Self {
            kind: PaymentMethodKind::Paypal,
            last_four: None,
        }
    }
}
