//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen for reasonable UX; nothing downstream enforces
//! lengths on its own.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: catalog item, category, seller, customer name
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: zip codes, state/country codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Street addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
