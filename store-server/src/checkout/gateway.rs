//! Simulated payment gateway
//!
//! Stands in for an external processor during development and tests:
//! a configurable authorization delay, a hard deadline, and a
//! deterministic decline trigger. Authorization is cancellable at any
//! point before it resolves.

use rust_decimal::Decimal;
use shared::PaymentMethod;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Card numbers ending in this suffix are always declined
const DECLINE_SUFFIX: &str = "0002";

/// Result of one authorization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Approved,
    Declined(String),
}

/// Why an authorization attempt never resolved
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Payment gateway timed out")]
    TimedOut,

    #[error("Authorization was cancelled")]
    Cancelled,
}

/// Simulated processor with fixed latency and deadline
#[derive(Debug, Clone)]
pub struct PaymentGateway {
    delay: Duration,
    timeout: Duration,
}

impl PaymentGateway {
    pub fn new(delay: Duration, timeout: Duration) -> Self {
        Self { delay, timeout }
    }

    /// Authorize a payment.
    ///
    /// Resolves after the configured delay unless the deadline passes
    /// or the caller cancels first. Cancellation and timeout mean the
    /// attempt never produced an outcome - the caller must not record
    /// anything for it.
    pub async fn authorize(
        &self,
        method: &PaymentMethod,
        amount: Decimal,
        cancel: &CancellationToken,
    ) -> Result<AuthorizationOutcome, GatewayError> {
        tracing::debug!(method = %method.kind, %amount, "Authorizing payment");

        tokio::select! {
            _ = tokio::time::sleep(self.delay) => {}
            _ = tokio::time::sleep(self.timeout) => {
                tracing::warn!(method = %method.kind, "Gateway deadline exceeded");
                return Err(GatewayError::TimedOut);
            }
            _ = cancel.cancelled() => {
                tracing::info!(method = %method.kind, "Authorization cancelled by caller");
                return Err(GatewayError::Cancelled);
            }
        }

        if let Some(last_four) = &method.last_four
            && last_four == DECLINE_SUFFIX
        {
            return Ok(AuthorizationOutcome::Declined(
                "Card was declined by the issuer".to_string(),
            ));
        }

        Ok(AuthorizationOutcome::Approved)
    }
}
