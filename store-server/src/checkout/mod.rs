//! Checkout orchestrator
//!
//! Drives one purchase attempt end to end:
//!
//! ```text
//! submit(request)
//!     ├─ 1. Validate shipping address and contact fields
//!     ├─ 2. Validate payment details (card number / expiry / CVC)
//!     ├─ 3. Price the cart (subtotal + shipping + tax)
//!     ├─ 4. Authorize against the gateway (cancellable, deadlined)
//!     ├─ 5. Record the transaction (idempotent append, pending)
//!     └─ 6. Mark it completed or failed per the gateway outcome
//! ```
//!
//! A cancelled or timed-out authorization aborts before step 5, so it
//! leaves no record. A decline is a real outcome: the transaction is
//! recorded and immediately marked failed.

mod card;
mod gateway;
pub mod money;

pub use card::{CardDetails, CardError};
pub use gateway::{AuthorizationOutcome, GatewayError, PaymentGateway};
pub use money::CartPricing;

use crate::ledger::{LedgerError, TransactionLedger};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::{
    LineItem, PaymentMethod, ShippingAddress, TransactionDraft, TransactionStatus,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Invalid checkout request: {0}")]
    Validation(String),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error("Payment gateway timed out")]
    GatewayTimeout,

    #[error("Checkout was cancelled")]
    Cancelled,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<GatewayError> for CheckoutError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::TimedOut => CheckoutError::GatewayTimeout,
            GatewayError::Cancelled => CheckoutError::Cancelled,
        }
    }
}

impl From<CheckoutError> for crate::utils::AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Validation(msg) => crate::utils::AppError::validation(msg),
            CheckoutError::Card(e) => crate::utils::AppError::validation(e.to_string()),
            CheckoutError::GatewayTimeout | CheckoutError::Cancelled => {
                crate::utils::AppError::business_rule(err.to_string())
            }
            CheckoutError::Ledger(e) => e.into(),
        }
    }
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Payment details as submitted at checkout
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentSelection {
    CreditCard {
        number: String,
        /// MM/YY
        expiry: String,
        cvc: String,
    },
    Paypal,
}

/// One checkout attempt
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    pub payment: PaymentSelection,
    /// Client-supplied retry token; derived from the request when absent
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Outcome of an accepted checkout attempt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub transaction_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: TransactionStatus,
}

/// Orchestrates validation, pricing, authorization, and recording
pub struct CheckoutService {
    ledger: Arc<TransactionLedger>,
    gateway: PaymentGateway,
    tax_percent: Decimal,
    shipping_flat: Decimal,
    attempts: AtomicU64,
}

impl CheckoutService {
    pub fn new(
        ledger: Arc<TransactionLedger>,
        gateway: PaymentGateway,
        tax_percent: Decimal,
        shipping_flat: Decimal,
    ) -> Self {
        Self {
            ledger,
            gateway,
            tax_percent,
            shipping_flat,
            attempts: AtomicU64::new(0),
        }
    }

    /// Run one checkout attempt to completion.
    ///
    /// Returns a receipt whose status tells the caller whether payment
    /// went through (`completed`) or was declined (`failed`). Timeout
    /// and cancellation surface as errors and record nothing.
    pub async fn submit(
        &self,
        request: CheckoutRequest,
        cancel: &CancellationToken,
    ) -> CheckoutResult<CheckoutReceipt> {
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            attempt,
            user_id = %request.user_id,
            items = request.items.len(),
            "Checkout started"
        );

        validate_contact(&request)?;
        validate_shipping(&request.shipping_address)?;
        let method = self.validate_payment(&request.payment)?;

        let pricing = money::price_cart(&request.items, self.tax_percent, self.shipping_flat)?;

        let outcome = self
            .gateway
            .authorize(&method, pricing.total, cancel)
            .await?;

        let key = request
            .idempotency_key
            .clone()
            .unwrap_or_else(|| derive_key(&request, pricing.total, attempt));

        let draft = TransactionDraft {
            user_id: request.user_id,
            user_name: request.user_name,
            user_email: request.user_email,
            amount: pricing.total,
            items: request.items,
            payment_method: method,
            shipping_address: request.shipping_address,
        };

        let tx = self.ledger.append(draft, &key)?;

        // A replayed key returns the already-settled record; only a
        // freshly recorded (still pending) transaction advances.
        let tx = if tx.status == TransactionStatus::Pending {
            let next = match &outcome {
                AuthorizationOutcome::Approved => TransactionStatus::Completed,
                AuthorizationOutcome::Declined(reason) => {
                    tracing::warn!(transaction_id = %tx.id, %reason, "Payment declined");
                    TransactionStatus::Failed
                }
            };
            self.ledger.set_status(&tx.id, next)?
        } else {
            tx
        };

        tracing::info!(
            attempt,
            transaction_id = %tx.id,
            status = %tx.status,
            amount = %tx.amount,
            "Checkout finished"
        );
        Ok(CheckoutReceipt {
            transaction_id: tx.id,
            amount: tx.amount,
            status: tx.status,
        })
    }

    /// Price a cart without submitting it (storefront order summary)
    pub fn quote(&self, items: &[LineItem]) -> CheckoutResult<CartPricing> {
        money::price_cart(items, self.tax_percent, self.shipping_flat)
    }

    fn validate_payment(&self, payment: &PaymentSelection) -> CheckoutResult<PaymentMethod> {
        match payment {
            PaymentSelection::CreditCard {
                number,
                expiry,
                cvc,
            } => {
                let details = CardDetails {
                    number: number.clone(),
                    expiry: expiry.clone(),
                    cvc: cvc.clone(),
                };
                let last_four = details.validate(Utc::now().date_naive())?;
                Ok(PaymentMethod::card(last_four))
            }
            PaymentSelection::Paypal => Ok(PaymentMethod::paypal()),
        }
    }
}

fn validate_contact(request: &CheckoutRequest) -> CheckoutResult<()> {
    require(&request.user_id, "user_id", MAX_SHORT_TEXT_LEN)?;
    require(&request.user_name, "user_name", MAX_NAME_LEN)?;
    require(&request.user_email, "user_email", MAX_EMAIL_LEN)?;
    if !request.user_email.contains('@') {
        return Err(CheckoutError::Validation(
            "user_email is not a valid email address".to_string(),
        ));
    }
    Ok(())
}

fn validate_shipping(address: &ShippingAddress) -> CheckoutResult<()> {
    require(&address.name, "shipping name", MAX_NAME_LEN)?;
    require(&address.street, "street", MAX_ADDRESS_LEN)?;
    require(&address.city, "city", MAX_SHORT_TEXT_LEN)?;
    require(&address.state, "state", MAX_SHORT_TEXT_LEN)?;
    require(&address.zip, "zip", MAX_SHORT_TEXT_LEN)?;
    require(&address.country, "country", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

fn require(value: &str, field: &str, max_len: usize) -> CheckoutResult<()> {
    validate_required_text(value, field, max_len)
        .map_err(|err| CheckoutError::Validation(err.to_string()))
}

/// Fallback idempotency key for requests that carry none.
///
/// Hashes the buyer, the exact cart contents, the priced total, and
/// the monotonically increasing attempt counter. The counter keeps a
/// deliberate repurchase of the same cart from collapsing into the
/// earlier transaction; retry dedupe belongs to the client-supplied
/// key.
fn derive_key(request: &CheckoutRequest, total: Decimal, attempt: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.user_id.as_bytes());
    for item in &request.items {
        hasher.update(item.catalog_item_id.as_bytes());
        hasher.update(item.quantity.to_le_bytes());
        hasher.update(item.unit_price.to_string().as_bytes());
    }
    hasher.update(total.to_string().as_bytes());
    hasher.update(attempt.to_le_bytes());
    hex::encode(hasher.finalize())
}
