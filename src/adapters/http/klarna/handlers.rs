//! HTTP handlers for Klarna endpoints.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::klarna::{payment_return_url, resolve_return_host};
use crate::ports::{CreatePaymentRequestCommand, PaymentRequestProvider};

use super::dto::{CreatePaymentRequestBody, KlarnaConfigResponse, PaymentRequestResponse};

/// Application state for Klarna endpoints.
#[derive(Clone)]
pub struct KlarnaAppState {
    /// Payment request provider (injected)
    pub provider: Arc<dyn PaymentRequestProvider>,
    /// Web SDK client id handed to the browser
    pub websdk_client_id: Option<String>,
    /// Fallback host for return URLs
    pub public_host: Option<String>,
}

/// Return the web SDK client id.
///
/// GET /api/klarna/config
pub async fn get_config(
    State(state): State<KlarnaAppState>,
) -> Result<Json<KlarnaConfigResponse>, ApiError> {
    match state.websdk_client_id.filter(|id| !id.is_empty()) {
        Some(client_id) => Ok(Json(KlarnaConfigResponse { client_id })),
        None => {
            tracing::error!("Klarna web SDK client id is not configured");
            Err(ApiError::internal(
                "Klarna WebSDK Client ID not configured",
                "Please set CHECKOUT_GATEWAY__KLARNA__WEBSDK_CLIENT_ID",
            ))
        }
    }
}

/// Create a Klarna payment request.
///
/// POST /api/klarna/payment-request
pub async fn create_payment_request(
    State(state): State<KlarnaAppState>,
    headers: HeaderMap,
    body: Option<Json<CreatePaymentRequestBody>>,
) -> Result<Json<PaymentRequestResponse>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let host = resolve_return_host(
        header_value(&headers, "x-forwarded-host"),
        header_value(&headers, "host"),
        state.public_host.as_deref(),
    );
    tracing::debug!(host = %host, "Resolved return host");

    let command = CreatePaymentRequestCommand {
        amount: body.amount(),
        currency: body.currency,
        return_url: payment_return_url(&host),
    };

    let created = state
        .provider
        .create_payment_request(command)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Klarna payment request failed");
            ApiError::internal("Failed to create payment request", e.message)
        })?;

    Ok(Json(PaymentRequestResponse {
        payment_request_id: created.payment_request_id,
    }))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
