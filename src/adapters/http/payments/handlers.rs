//! HTTP handlers for Paytrail proxy endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::adapters::http::error::ApiError;
use crate::ports::{CreatePaymentRequest, PaymentGateway};

/// Application state for payment endpoints.
#[derive(Clone)]
pub struct PaymentsAppState {
    /// Paytrail gateway (injected)
    pub gateway: Arc<dyn PaymentGateway>,
}

/// List payment providers.
///
/// GET /api/merchants/payment-providers
pub async fn list_payment_providers(
    State(state): State<PaymentsAppState>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(endpoint = "/merchants/payment-providers", "Fetching payment providers");

    state.gateway.list_payment_providers().await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch payment providers");
        ApiError::upstream("Failed to fetch payment providers from Paytrail API", &e)
    })
}

/// List payment providers grouped by type.
///
/// GET /api/merchants/grouped-payment-providers
pub async fn list_grouped_payment_providers(
    State(state): State<PaymentsAppState>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(endpoint = "/merchants/grouped-payment-providers", "Fetching grouped payment providers");

    state.gateway.list_grouped_payment_providers().await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch grouped payment providers");
        ApiError::upstream("Failed to fetch grouped payment providers from Paytrail API", &e)
    })
}

/// Create a payment.
///
/// POST /api/payments
pub async fn create_payment(
    State(state): State<PaymentsAppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request = CreatePaymentRequest::from_value(body);

    let missing = request.missing_required_fields();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Payment request rejected");
        return Err(ApiError::missing_fields(missing));
    }

    tracing::info!(
        stamp = ?request.get("stamp"),
        reference = ?request.get("reference"),
        "Creating payment"
    );

    let payment = state.gateway.create_payment(request).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create payment");
        ApiError::upstream("Failed to create payment with Paytrail API", &e)
            .with_details(e.details.clone())
    })?;

    tracing::info!(transaction_id = ?payment.get("transactionId"), "Payment created");

    Ok((StatusCode::CREATED, Json(payment)))
}
