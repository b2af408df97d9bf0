//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure:
//! - `payments` - Paytrail proxy
//! - `klarna` - Klarna web SDK support
//! - `checkout` - Widget shipping callbacks per checkout session
//! - `health` - Liveness

pub mod checkout;
pub mod error;
pub mod health;
pub mod klarna;
pub mod payments;

use axum::Router;

// Re-export key types for convenience
pub use checkout::{checkout_router, CheckoutAppState};
pub use error::{ApiError, ErrorResponse};
pub use health::health_router;
pub use klarna::{klarna_router, KlarnaAppState};
pub use payments::{payments_router, PaymentsAppState};

/// Assembles every endpoint into one stateless router.
pub fn api_router(
    payments: PaymentsAppState,
    klarna: KlarnaAppState,
    checkout: CheckoutAppState,
) -> Router {
    Router::new()
        .merge(health_router())
        .merge(payments_router().with_state(payments))
        .merge(klarna_router().with_state(klarna))
        .merge(checkout_router().with_state(checkout))
}
