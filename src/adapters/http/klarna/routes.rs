//! Axum router configuration for Klarna endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_payment_request, get_config, KlarnaAppState};

/// Create the Klarna router.
///
/// # Routes
/// - `GET /config` - Web SDK client id
/// - `POST /payment-request` - Create a payment request
pub fn klarna_routes() -> Router<KlarnaAppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/payment-request", post(create_payment_request))
}

/// Create the Klarna module router for mounting at the root.
pub fn klarna_router() -> Router<KlarnaAppState> {
    Router::new().nest("/api/klarna", klarna_routes())
}
