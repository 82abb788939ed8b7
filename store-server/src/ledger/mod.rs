//! TransactionLedger - append-only payment record store
//!
//! The single source of truth for every money-related dashboard.
//! Records are created exactly once per accepted checkout attempt and
//! are immutable afterwards except for forward-only status changes.
//!
//! # Write flow
//!
//! ```text
//! append(draft, key)
//!     ├─ 1. Validate the draft (non-empty items, positive quantities)
//!     ├─ 2. Take the write lock
//!     ├─ 3. Idempotency check (key) - repeat keys return the stored record
//!     ├─ 4. Construct the full Transaction (atomic publish)
//!     └─ 5. Insert + index, release lock
//! ```
//!
//! Readers take the shared lock and either filter in place or clone a
//! whole snapshot, so a reader can never observe a half-written
//! record. `append` and `set_status` serialize on the same lock.

mod error;
mod filter;

pub use error::{LedgerError, LedgerResult};
pub use filter::TransactionFilter;

use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::{Transaction, TransactionDraft, TransactionStatus};
use std::collections::HashMap;

#[derive(Default)]
struct LedgerInner {
    /// Insertion-ordered records
    transactions: Vec<Transaction>,
    /// Transaction id -> index into `transactions`
    by_id: HashMap<String, usize>,
    /// Idempotency key -> index into `transactions`
    by_key: HashMap<String, usize>,
}

/// Append-only, queryable transaction ledger
pub struct TransactionLedger {
    inner: RwLock<LedgerInner>,
}

impl std::fmt::Debug for TransactionLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionLedger")
            .field("len", &self.len())
            .finish()
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLedger {
    /// Create an empty ledger (valid initial state on every restart)
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerInner::default()),
        }
    }

    /// Record a transaction, idempotently.
    ///
    /// The check-and-insert runs under one write lock: two concurrent
    /// calls carrying the same idempotency key store exactly one
    /// record, and the loser receives the winner's stored transaction.
    /// The record enters the ledger with `pending` status.
    pub fn append(
        &self,
        draft: TransactionDraft,
        idempotency_key: &str,
    ) -> LedgerResult<Transaction> {
        validate_draft(&draft)?;

        let mut inner = self.inner.write();

        if let Some(&idx) = inner.by_key.get(idempotency_key) {
            let existing = inner.transactions[idx].clone();
            tracing::debug!(
                transaction_id = %existing.id,
                key = %idempotency_key,
                "Duplicate submission resolved idempotently"
            );
            return Ok(existing);
        }

        // Fully construct before insertion so no reader can observe a
        // partially initialized record.
        let tx = Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: draft.user_id,
            user_name: draft.user_name,
            user_email: draft.user_email,
            date: Utc::now(),
            status: TransactionStatus::Pending,
            amount: draft.amount,
            items: draft.items,
            payment_method: draft.payment_method,
            shipping_address: draft.shipping_address,
        };

        let idx = inner.transactions.len();
        inner.by_id.insert(tx.id.clone(), idx);
        inner.by_key.insert(idempotency_key.to_string(), idx);
        inner.transactions.push(tx.clone());

        tracing::info!(
            transaction_id = %tx.id,
            user_id = %tx.user_id,
            amount = %tx.amount,
            "Transaction recorded"
        );
        Ok(tx)
    }

    /// Look up a transaction by id
    pub fn get(&self, id: &str) -> Option<Transaction> {
        let inner = self.inner.read();
        inner
            .by_id
            .get(id)
            .map(|&idx| inner.transactions[idx].clone())
    }

    /// List transactions matching the filter, in insertion order
    pub fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let inner = self.inner.read();
        inner
            .transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect()
    }

    /// Transactions where at least one line item belongs to the seller.
    ///
    /// Whole transactions are returned - a record may legitimately span
    /// several sellers. Revenue projection down to the seller's own
    /// line items happens in the aggregation engine.
    pub fn list_for_seller(&self, seller_id: &str) -> Vec<Transaction> {
        let inner = self.inner.read();
        inner
            .transactions
            .iter()
            .filter(|tx| tx.involves_seller(seller_id))
            .cloned()
            .collect()
    }

    /// Advance a transaction's status along the forward-only table.
    ///
    /// `pending -> completed | failed`, `completed -> refunded`; any
    /// other transition fails with [`LedgerError::InvalidTransition`]
    /// and leaves the record untouched.
    pub fn set_status(
        &self,
        id: &str,
        new_status: TransactionStatus,
    ) -> LedgerResult<Transaction> {
        let mut inner = self.inner.write();
        let idx = *inner
            .by_id
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        let current = inner.transactions[idx].status;
        if !current.can_transition_to(new_status) {
            return Err(LedgerError::InvalidTransition {
                id: id.to_string(),
                from: current,
                to: new_status,
            });
        }

        inner.transactions[idx].status = new_status;
        tracing::info!(
            transaction_id = %id,
            from = %current,
            to = %new_status,
            "Transaction status updated"
        );
        Ok(inner.transactions[idx].clone())
    }

    /// One consistent copy of the whole ledger, in insertion order.
    ///
    /// Aggregation passes derive every figure from a single snapshot so
    /// a concurrent write can never mix pre- and post-write data within
    /// one computation.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.inner.read().transactions.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().transactions.is_empty()
    }
}

impl crate::query::Queryable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.id, &self.user_name, &self.user_email]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "method" => Some(self.payment_method.kind.to_string()),
            _ => None,
        }
    }

    fn numeric(&self, key: &str) -> Option<Decimal> {
        match key {
            "amount" => Some(self.amount),
            _ => None,
        }
    }

    fn sort_value(&self, key: shared::SortKey) -> Option<Decimal> {
        match key {
            shared::SortKey::Newest => Some(Decimal::from(self.date.timestamp())),
            _ => None,
        }
    }
}

fn validate_draft(draft: &TransactionDraft) -> LedgerResult<()> {
    if draft.items.is_empty() {
        return Err(LedgerError::InvalidTransaction(
            "transaction must contain at least one line item".to_string(),
        ));
    }
    for item in &draft.items {
        if item.quantity <= 0 {
            return Err(LedgerError::InvalidTransaction(format!(
                "quantity must be positive, got {} for {}",
                item.quantity, item.catalog_item_id
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(LedgerError::InvalidTransaction(format!(
                "unit price must be non-negative, got {} for {}",
                item.unit_price, item.catalog_item_id
            )));
        }
    }
    if draft.amount < Decimal::ZERO {
        return Err(LedgerError::InvalidTransaction(format!(
            "amount must be non-negative, got {}",
            draft.amount
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
