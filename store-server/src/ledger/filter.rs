//! Transaction list predicate
//!
//! A [`TransactionFilter`] combines status equality, inclusive
//! date-range membership, payment-method kind equality, and a
//! case-insensitive substring match over id / user name / user email.
//! Everything unset matches; filters compose with AND.

use chrono::{DateTime, Utc};
use shared::{PaymentMethodKind, Transaction, TransactionStatus};

/// Predicate for [`TransactionLedger::list`](super::TransactionLedger::list)
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    /// Inclusive lower bound on the transaction date
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the transaction date
    pub until: Option<DateTime<Utc>>,
    pub method: Option<PaymentMethodKind>,
    /// Case-insensitive substring over id, user name, user email
    pub needle: Option<String>,
}

impl TransactionFilter {
    /// A filter that matches everything
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date_range(mut self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.until = Some(until);
        self
    }

    pub fn with_method(mut self, method: PaymentMethodKind) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_needle(mut self, needle: impl Into<String>) -> Self {
        self.needle = Some(needle.into());
        self
    }

    /// Whether the transaction passes every set predicate
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(status) = self.status
            && tx.status != status
        {
            return false;
        }
        if let Some(from) = self.from
            && tx.date < from
        {
            return false;
        }
        if let Some(until) = self.until
            && tx.date > until
        {
            return false;
        }
        if let Some(method) = self.method
            && tx.payment_method.kind != method
        {
            return false;
        }
        if let Some(needle) = &self.needle {
            let needle = needle.to_lowercase();
            let hit = tx.id.to_lowercase().contains(&needle)
                || tx.user_name.to_lowercase().contains(&needle)
                || tx.user_email.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}
