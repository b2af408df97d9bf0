//! Axum router configuration for checkout session endpoints.

use axum::{
    routing::{delete, post},
    Router,
};

use super::handlers::{
    change_shipping_address, end_session, select_shipping_option, start_session,
    CheckoutAppState,
};

/// Create the checkout session router.
///
/// # Routes
/// - `POST /` - Start a session
/// - `POST /:id/shipping-address` - Widget address change
/// - `POST /:id/shipping-option` - Widget option selection
/// - `DELETE /:id` - End a session
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/", post(start_session))
        .route("/:id/shipping-address", post(change_shipping_address))
        .route("/:id/shipping-option", post(select_shipping_option))
        .route("/:id", delete(end_session))
}

/// Create the checkout module router for mounting at the root.
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new().nest("/api/checkout/sessions", checkout_routes())
}
