//! Klarna adapter.
//!
//! Implements the `PaymentRequestProvider` port and the return URL rules
//! Klarna's whitelist requires.

mod klarna_adapter;
mod return_url;

pub use klarna_adapter::{KlarnaConfig, KlarnaPaymentRequestAdapter, DEFAULT_KLARNA_BASE_URL};
pub use return_url::{payment_return_url, resolve_return_host, DEFAULT_PUBLIC_HOST};
