//! HTTP handlers for checkout session endpoints.
//!
//! Each handler maps one widget callback onto the session's `CheckoutState`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::klarna::{payment_return_url, resolve_return_host};
use crate::domain::checkout::{CheckoutState, LineItem, ShippingSelection};
use crate::domain::foundation::{CheckoutSessionId, DomainError};
use crate::ports::{CheckoutSessionStore, SessionStoreError};

use super::dto::{
    ShippingAddressChangeRequest, ShippingAddressChangeResponse, ShippingOptionSelectRequest,
    StartCheckoutRequest, StartCheckoutResponse,
};

/// Application state for checkout endpoints.
#[derive(Clone)]
pub struct CheckoutAppState {
    /// Session store (injected)
    pub sessions: Arc<dyn CheckoutSessionStore>,
    /// Currency of every checkout
    pub currency: String,
    /// Fallback host for return URLs
    pub public_host: Option<String>,
}

/// Start a checkout session for one product.
///
/// POST /api/checkout/sessions
pub async fn start_session(
    State(state): State<CheckoutAppState>,
    headers: HeaderMap,
    Json(request): Json<StartCheckoutRequest>,
) -> Result<(StatusCode, Json<StartCheckoutResponse>), ApiError> {
    let product = LineItem::new(request.product_name.clone(), request.quantity(), request.price())
        .map_err(DomainError::from)?;

    let checkout = CheckoutState::for_product(product);
    let host = resolve_return_host(
        headers.get("x-forwarded-host").and_then(|v| v.to_str().ok()),
        headers.get("host").and_then(|v| v.to_str().ok()),
        state.public_host.as_deref(),
    );
    let initiate = checkout.initiation_payload(state.currency.clone(), payment_return_url(&host));

    let id = CheckoutSessionId::new();
    state.sessions.insert(id, checkout).await?;

    let active_sessions = state.sessions.count().await;
    tracing::info!(
        session_id = %id,
        amount = initiate.amount,
        active_sessions = active_sessions,
        "Checkout session started"
    );

    Ok((
        StatusCode::CREATED,
        Json(StartCheckoutResponse {
            session_id: id.to_string(),
            initiate,
        }),
    ))
}

/// Handle the widget's shipping-address change.
///
/// POST /api/checkout/sessions/:id/shipping-address
pub async fn change_shipping_address(
    State(state): State<CheckoutAppState>,
    Path(id): Path<String>,
    body: Option<Json<ShippingAddressChangeRequest>>,
) -> Result<Json<ShippingAddressChangeResponse>, ApiError> {
    let id = parse_session_id(&id)?;
    let address = body.and_then(|Json(b)| b.address());

    let updated = state
        .sessions
        .update(
            &id,
            Box::new(move |checkout: &mut CheckoutState| {
                checkout.change_shipping_address(address.as_ref());
            }),
        )
        .await?;

    tracing::debug!(
        session_id = %id,
        options = updated.shipping_options().len(),
        "Shipping address changed"
    );

    Ok(Json(ShippingAddressChangeResponse {
        shipping_options: updated.shipping_options().to_vec(),
    }))
}

/// Handle the widget's shipping-option selection.
///
/// POST /api/checkout/sessions/:id/shipping-option
pub async fn select_shipping_option(
    State(state): State<CheckoutAppState>,
    Path(id): Path<String>,
    body: Option<Json<ShippingOptionSelectRequest>>,
) -> Result<Json<ShippingSelection>, ApiError> {
    let id = parse_session_id(&id)?;
    let reference = body.and_then(|Json(b)| b.reference());

    let updated = state
        .sessions
        .update(
            &id,
            Box::new(move |checkout: &mut CheckoutState| {
                checkout.select_shipping_option(reference.as_deref());
            }),
        )
        .await?;

    let selection = ShippingSelection {
        amount: updated.total_amount(),
        line_items: updated.line_items(),
    };

    tracing::debug!(session_id = %id, amount = selection.amount, "Shipping option selected");

    Ok(Json(selection))
}

/// Discard a session.
///
/// DELETE /api/checkout/sessions/:id
pub async fn end_session(
    State(state): State<CheckoutAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&id)?;

    if !state.sessions.remove(&id).await? {
        return Err(SessionStoreError::NotFound(id).into());
    }

    tracing::info!(session_id = %id, "Checkout session ended");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_session_id(raw: &str) -> Result<CheckoutSessionId, ApiError> {
    raw.parse::<CheckoutSessionId>().map_err(|_| {
        ApiError::not_found("Checkout session not found", format!("Checkout session not found: {}", raw))
    })
}
