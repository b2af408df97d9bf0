//! Axum router configuration for Paytrail proxy endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_payment, list_grouped_payment_providers, list_payment_providers, PaymentsAppState,
};

/// Create the payments router.
///
/// # Routes
/// - `GET /merchants/payment-providers`
/// - `GET /merchants/grouped-payment-providers`
/// - `POST /payments`
pub fn payments_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/merchants/payment-providers", get(list_payment_providers))
        .route(
            "/merchants/grouped-payment-providers",
            get(list_grouped_payment_providers),
        )
        .route("/payments", post(create_payment))
}

/// Create the payments module router for mounting at `/api`.
pub fn payments_router() -> Router<PaymentsAppState> {
    Router::new().nest("/api", payments_routes())
}
