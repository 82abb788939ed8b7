//! Checkout API Handlers
//!
//! Checkout outcomes travel in the response body rather than as HTTP
//! error codes: the storefront renders a declined card and a malformed
//! expiry the same way, inline on the payment form.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{LineItem, TransactionStatus};
use tokio_util::sync::CancellationToken;

use crate::checkout::{CartPricing, CheckoutRequest};
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/checkout - run one checkout attempt
pub async fn submit(
    State(state): State<ServerState>,
    Json(request): Json<CheckoutRequest>,
) -> Json<CheckoutResponse> {
    // Dropping the request (client disconnect) drops this token and
    // aborts the gateway call before anything is recorded.
    let cancel = CancellationToken::new();

    let response = match state.checkout.submit(request, &cancel).await {
        Ok(receipt) => CheckoutResponse {
            success: receipt.status == TransactionStatus::Completed,
            transaction_id: Some(receipt.transaction_id),
            status: Some(receipt.status),
            amount: Some(receipt.amount),
            error: match receipt.status {
                TransactionStatus::Failed => Some("Payment was declined".to_string()),
                _ => None,
            },
        },
        Err(err) => CheckoutResponse {
            success: false,
            transaction_id: None,
            status: None,
            amount: None,
            error: Some(err.to_string()),
        },
    };

    Json(response)
}

#[derive(Debug, serde::Deserialize)]
pub struct QuoteRequest {
    pub items: Vec<LineItem>,
}

/// POST /api/checkout/quote - price a cart without submitting it
pub async fn quote(
    State(state): State<ServerState>,
    Json(request): Json<QuoteRequest>,
) -> AppResult<Json<AppResponse<QuoteResponse>>> {
    let pricing = state.checkout.quote(&request.items)?;
    Ok(ok(QuoteResponse::from(pricing)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<CartPricing> for QuoteResponse {
    fn from(pricing: CartPricing) -> Self {
        Self {
            subtotal: pricing.subtotal,
            shipping: pricing.shipping,
            tax: pricing.tax,
            total: pricing.total,
        }
    }
}
