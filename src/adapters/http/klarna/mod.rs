//! HTTP adapter for Klarna endpoints.
//!
//! - `GET /api/klarna/config` - Web SDK client id for the browser
//! - `POST /api/klarna/payment-request` - Create a payment request

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::KlarnaAppState;
pub use routes::klarna_router;
