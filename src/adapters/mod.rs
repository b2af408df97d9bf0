//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `paytrail` - Signed Paytrail merchant API client
//! - `klarna` - Klarna payment requests
//! - `storage` - Checkout session storage
//! - `system` - Wall clock and nonce sources
//! - `http` - REST API

pub mod http;
pub mod klarna;
pub mod paytrail;
pub mod storage;
pub mod system;

pub use klarna::{KlarnaConfig, KlarnaPaymentRequestAdapter};
pub use paytrail::{MockPaymentGateway, PaytrailConfig, PaytrailGateway};
pub use storage::InMemoryCheckoutSessions;
pub use system::{FixedClock, SequentialNonceSource, SystemClock, UuidNonceSource};
