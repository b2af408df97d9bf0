//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `signing` - HMAC-SHA256 signing of outbound payment API requests
//! - `checkout` - Per-session shipping recalculation for the payment widget

pub mod checkout;
pub mod foundation;
pub mod signing;
