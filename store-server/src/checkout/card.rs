//! Card detail validation
//!
//! Runs before anything reaches the payment gateway. Only the last
//! four digits of an accepted card survive validation; the full
//! number, expiry, and CVC are dropped on the floor.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Card number must be exactly 16 digits")]
    InvalidCardNumber,

    #[error("Expiry must be in MM/YY format")]
    InvalidExpiryFormat,

    #[error("Card has expired")]
    CardExpired,

    #[error("CVC must be 3 or 4 digits")]
    InvalidCvc,
}

/// Raw card details as entered at checkout
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: String,
    /// MM/YY
    pub expiry: String,
    pub cvc: String,
}

impl CardDetails {
    /// Validate against the given date and return the last four digits.
    ///
    /// Spaces in the number are tolerated (card entry widgets insert
    /// them); everything else must be exactly 16 digits. Expiry lapses
    /// once the first day of the expiry month falls before `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<String, CardError> {
        let digits: String = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardError::InvalidCardNumber);
        }

        let (month, year) = parse_expiry(&self.expiry)?;
        if is_expired(month, year, today) {
            return Err(CardError::CardExpired);
        }

        if !matches!(self.cvc.len(), 3 | 4) || !self.cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardError::InvalidCvc);
        }

        Ok(digits[12..].to_string())
    }
}

/// Parse `MM/YY` into (month, full year)
fn parse_expiry(expiry: &str) -> Result<(u32, i32), CardError> {
    let (mm, yy) = expiry
        .split_once('/')
        .ok_or(CardError::InvalidExpiryFormat)?;
    if mm.len() != 2 || yy.len() != 2 {
        return Err(CardError::InvalidExpiryFormat);
    }

    let month: u32 = mm.parse().map_err(|_| CardError::InvalidExpiryFormat)?;
    let year: i32 = yy.parse().map_err(|_| CardError::InvalidExpiryFormat)?;
    if !(1..=12).contains(&month) {
        return Err(CardError::InvalidExpiryFormat);
    }

    Ok((month, 2000 + year))
}

/// Expired when the constructed date (first of the expiry month) is
/// strictly before `today`
fn is_expired(month: u32, year: i32, today: NaiveDate) -> bool {
    NaiveDate::from_ymd_opt(year, month, 1).is_none_or(|first| first < today)
}
