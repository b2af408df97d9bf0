//! HTTP adapter for checkout sessions.
//!
//! Exposes the payment widget's shipping callbacks per session:
//! - `POST /api/checkout/sessions` - Start a session, returns the `initiate` payload
//! - `POST /api/checkout/sessions/:id/shipping-address` - Address changed
//! - `POST /api/checkout/sessions/:id/shipping-option` - Option selected
//! - `DELETE /api/checkout/sessions/:id` - End a session

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CheckoutAppState;
pub use routes::checkout_router;
