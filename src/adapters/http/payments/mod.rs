//! HTTP adapter for Paytrail proxy endpoints.
//!
//! - `GET /api/merchants/payment-providers` - Flat provider list
//! - `GET /api/merchants/grouped-payment-providers` - Providers grouped by type
//! - `POST /api/payments` - Create a payment

pub mod handlers;
pub mod routes;

pub use handlers::PaymentsAppState;
pub use routes::payments_router;
