use shared::TransactionStatus;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
}

impl From<LedgerError> for crate::utils::AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => {
                crate::utils::AppError::not_found(format!("Transaction {}", id))
            }
            LedgerError::InvalidTransition { .. } => {
                crate::utils::AppError::business_rule(err.to_string())
            }
            LedgerError::InvalidTransaction(msg) => crate::utils::AppError::validation(msg),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
