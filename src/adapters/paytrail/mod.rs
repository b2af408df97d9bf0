//! Paytrail payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for the Paytrail merchant API:
//! - Payment provider listings (flat and grouped)
//! - Payment creation
//!
//! # Configuration
//!
//! Required environment variables:
//! - `CHECKOUT_GATEWAY__PAYTRAIL__MERCHANT_ID`: merchant account id
//! - `CHECKOUT_GATEWAY__PAYTRAIL__SECRET_KEY`: merchant secret key

mod mock_payment_gateway;
mod paytrail_adapter;

pub use mock_payment_gateway::{MethodCall, MockPaymentGateway};
pub use paytrail_adapter::{PaytrailConfig, PaytrailGateway, DEFAULT_PAYTRAIL_API_URL};
