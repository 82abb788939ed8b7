//! Utility module - common helpers and types
//!
//! - [`AppError`] - application error type with HTTP mapping
//! - [`AppResponse`] - API response envelope
//! - Logging and input validation helpers

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult, ok};
