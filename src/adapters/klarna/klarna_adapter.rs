//! Klarna payment request adapter.
//!
//! Implements `PaymentRequestProvider` against the Klarna Payments v2 API
//! with HTTP Basic auth (API key as user, empty password).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{
    CreatePaymentRequestCommand, NonceSource, PaymentError, PaymentRequestCreated,
    PaymentRequestProvider, DEFAULT_PAYMENT_REQUEST_AMOUNT,
};

/// Default Klarna API base URL (test environment).
pub const DEFAULT_KLARNA_BASE_URL: &str = "https://api-global.test.klarna.com";

/// Prefix of generated payment and purchase references.
const REFERENCE_PREFIX: &str = "pay-ref-";

/// Klarna API configuration.
#[derive(Clone)]
pub struct KlarnaConfig {
    api_key: Option<SecretString>,
    base_url: String,
    default_currency: String,
    timeout: Duration,
}

impl KlarnaConfig {
    /// Create a configuration; `api_key` may be absent until requests are made.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()).map(SecretString::new),
            base_url: DEFAULT_KLARNA_BASE_URL.to_string(),
            default_currency: "EUR".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the currency used when a request names none.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for KlarnaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KlarnaConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("default_currency", &self.default_currency)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct PaymentRequestPayload {
    currency: String,
    amount: i64,
    payment_request_reference: String,
    supplementary_purchase_data: SupplementaryPurchaseData,
    customer_interaction_config: CustomerInteractionConfig,
}

#[derive(Debug, Serialize)]
struct SupplementaryPurchaseData {
    purchase_reference: String,
    line_items: Vec<serde_json::Value>,
    shipping: Vec<serde_json::Value>,
    customer: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct CustomerInteractionConfig {
    return_url: String,
}

#[derive(Debug, Deserialize)]
struct PaymentRequestResponse {
    payment_request_id: Option<String>,
}

/// Klarna payment request adapter.
pub struct KlarnaPaymentRequestAdapter {
    config: KlarnaConfig,
    references: Arc<dyn NonceSource>,
    http_client: reqwest::Client,
}

impl KlarnaPaymentRequestAdapter {
    /// Create a new adapter. `references` supplies the unique part of
    /// generated payment references.
    pub fn new(config: KlarnaConfig, references: Arc<dyn NonceSource>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            config,
            references,
            http_client,
        }
    }

    fn reference(&self) -> String {
        format!("{}{}", REFERENCE_PREFIX, self.references.next_nonce())
    }

    fn build_payload(&self, command: CreatePaymentRequestCommand) -> PaymentRequestPayload {
        let currency = command
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.config.default_currency.clone());
        let amount = command
            .amount
            .filter(|a| *a > 0)
            .unwrap_or(DEFAULT_PAYMENT_REQUEST_AMOUNT);

        PaymentRequestPayload {
            currency,
            amount,
            payment_request_reference: self.reference(),
            supplementary_purchase_data: SupplementaryPurchaseData {
                purchase_reference: self.reference(),
                line_items: Vec::new(),
                shipping: Vec::new(),
                customer: serde_json::Map::new(),
            },
            customer_interaction_config: CustomerInteractionConfig {
                return_url: command.return_url,
            },
        }
    }
}

#[async_trait]
impl PaymentRequestProvider for KlarnaPaymentRequestAdapter {
    async fn create_payment_request(
        &self,
        command: CreatePaymentRequestCommand,
    ) -> Result<PaymentRequestCreated, PaymentError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            PaymentError::configuration("Klarna API key is not configured")
        })?;

        let url = format!("{}/v2/payment/requests", self.config.base_url);
        let payload = self.build_payload(command);

        tracing::info!(
            reference = %payload.payment_request_reference,
            currency = %payload.currency,
            amount = payload.amount,
            "Creating Klarna payment request"
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(api_key.expose_secret(), Option::<&str>::None)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), error = %error_text, "Klarna create_payment_request failed");
            return Err(PaymentError::provider(
                status.as_u16(),
                format!("Klarna API error: {}", error_text),
            ));
        }

        let body: PaymentRequestResponse = response.json().await.map_err(|e| {
            PaymentError::invalid_response(format!("Failed to parse Klarna response: {}", e))
        })?;

        let payment_request_id = body.payment_request_id.ok_or_else(|| {
            PaymentError::invalid_response("Klarna response has no payment_request_id")
        })?;

        tracing::info!(payment_request_id = %payment_request_id, "Klarna payment request created");

        Ok(PaymentRequestCreated { payment_request_id })
    }
}
