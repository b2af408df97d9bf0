//! Checkout Gateway - Signed Paytrail proxy and Klarna shipping recalculation
//!
//! This crate signs outbound Paytrail API requests with HMAC-SHA256 and keeps
//! per-session checkout state for the Klarna payment widget's shipping
//! callbacks.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
