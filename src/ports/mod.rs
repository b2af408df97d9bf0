//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Freshness Ports
//!
//! - `Clock` - Wall-clock time for signature timestamps
//! - `NonceSource` - Single-use values for signature nonces
//!
//! ## Payment Ports
//!
//! - `PaymentGateway` - Paytrail merchant API (providers, payments)
//! - `PaymentRequestProvider` - Klarna payment requests for the web SDK
//!
//! ## Session Ports
//!
//! - `CheckoutSessionStore` - Per-session checkout state

mod checkout_session_store;
mod clock;
mod payment_gateway;
mod payment_request_provider;

pub use checkout_session_store::{CheckoutSessionStore, SessionStoreError, SessionUpdate};
pub use clock::{Clock, NonceSource};
pub use payment_gateway::{
    CreatePaymentRequest, PaymentError, PaymentErrorCode, PaymentGateway, REQUIRED_PAYMENT_FIELDS,
};
pub use payment_request_provider::{
    CreatePaymentRequestCommand, PaymentRequestCreated, PaymentRequestProvider,
    DEFAULT_PAYMENT_REQUEST_AMOUNT,
};
