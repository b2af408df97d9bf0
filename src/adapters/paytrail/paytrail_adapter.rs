//! Paytrail payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait over the Paytrail REST API.
//!
//! # Security
//!
//! - Every request is signed with HMAC-SHA256 over the `checkout-*` headers
//!   and the exact body bytes sent
//! - Every successful response must carry a valid `signature` over its
//!   `checkout-*` headers and body; unsigned or tampered responses are
//!   rejected
//! - The merchant secret is held in a `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = PaytrailConfig::new("375917", "SAIPPUAKAUPPIAS");
//! let gateway = PaytrailGateway::new(config, Arc::new(SystemClock), Arc::new(UuidNonceSource))?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::domain::signing::{
    RequestSigner, SignatureHeaders, SigningError, CHECKOUT_HEADER_PREFIX, SIGNATURE_HEADER,
};
use crate::ports::{
    Clock, CreatePaymentRequest, NonceSource, PaymentError, PaymentErrorCode, PaymentGateway,
};

/// Default Paytrail API base URL.
pub const DEFAULT_PAYTRAIL_API_URL: &str = "https://services.paytrail.com";

/// Content type sent with every request.
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Paytrail API configuration.
#[derive(Clone)]
pub struct PaytrailConfig {
    /// Merchant account id (`checkout-account`).
    merchant_id: String,

    /// Merchant secret key used as the HMAC key.
    secret_key: SecretString,

    /// Base URL for the API.
    api_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl PaytrailConfig {
    /// Create a new Paytrail configuration.
    pub fn new(merchant_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            secret_key: SecretString::new(secret_key.into()),
            api_url: DEFAULT_PAYTRAIL_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl std::fmt::Debug for PaytrailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaytrailConfig")
            .field("merchant_id", &self.merchant_id)
            .field("secret_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Paytrail payment gateway adapter.
pub struct PaytrailGateway {
    signer: RequestSigner,
    api_url: String,
    http_client: reqwest::Client,
}

impl PaytrailGateway {
    /// Create a new gateway.
    ///
    /// # Errors
    ///
    /// Returns a `SigningError` if the merchant id or secret key is blank.
    pub fn new(
        config: PaytrailConfig,
        clock: Arc<dyn Clock>,
        nonces: Arc<dyn NonceSource>,
    ) -> Result<Self, SigningError> {
        let signer = RequestSigner::new(
            config.merchant_id,
            config.secret_key.expose_secret().clone(),
            clock,
            nonces,
        )?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Ok(Self {
            signer,
            api_url: config.api_url,
            http_client,
        })
    }

    /// Builds a signed request without sending it.
    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Request, PaymentError> {
        let url = format!("{}{}", self.api_url, path);
        let body = body.map(Value::to_string).unwrap_or_default();

        let signed = self
            .signer
            .sign(method.as_str(), &url, &SignatureHeaders::new(), &body)
            .map_err(|e| {
                if e.is_configuration_error() {
                    PaymentError::configuration(e.to_string())
                } else {
                    PaymentError::new(PaymentErrorCode::SigningError, e.to_string())
                }
            })?;

        let mut builder = self
            .http_client
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE);
        for (name, value) in signed.header_pairs() {
            builder = builder.header(name, value);
        }
        if !body.is_empty() {
            builder = builder.body(body);
        }

        builder
            .build()
            .map_err(|e| PaymentError::new(PaymentErrorCode::ProviderError, e.to_string()))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, PaymentError> {
        let request = self.build_request(method.clone(), path, body)?;

        let response = self.http_client.execute(request).await.map_err(|e| {
            tracing::error!(method = %method, endpoint = path, error = %e, "Paytrail request failed");
            PaymentError::network(e.to_string())
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await.map_err(|e| {
            tracing::error!(
                method = %method,
                endpoint = path,
                status = status.as_u16(),
                error = %e,
                "Failed to read Paytrail response body"
            );
            PaymentError::network(format!("Failed to read Paytrail response: {}", e))
                .with_provider_status(status.as_u16())
        })?;

        if !status.is_success() {
            let message = error_message(status, &text);
            tracing::error!(
                method = %method,
                endpoint = path,
                status = status.as_u16(),
                error = %message,
                "Paytrail API error"
            );
            let err = PaymentError::provider(status.as_u16(), message);
            return Err(match serde_json::from_str::<Value>(&text) {
                Ok(details) => err.with_details(details),
                Err(_) => err,
            });
        }

        self.verify_response(&headers, &text).map_err(|e| {
            tracing::error!(
                method = %method,
                endpoint = path,
                status = status.as_u16(),
                error = %e,
                "Paytrail response failed signature verification"
            );
            PaymentError::invalid_response(format!("Paytrail response signature rejected: {}", e))
                .with_provider_status(status.as_u16())
        })?;

        tracing::debug!(method = %method, endpoint = path, status = status.as_u16(), "Paytrail request succeeded");

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            PaymentError::invalid_response(format!("Failed to parse Paytrail response: {}", e))
                .with_provider_status(status.as_u16())
        })
    }

    /// Checks the response `signature` against its `checkout-*` headers and body.
    fn verify_response(
        &self,
        headers: &reqwest::header::HeaderMap,
        body: &str,
    ) -> Result<(), SigningError> {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(SigningError::MissingSignature)?;

        let mut received = SignatureHeaders::new();
        for (name, value) in headers {
            if !name.as_str().starts_with(CHECKOUT_HEADER_PREFIX) {
                continue;
            }
            if let Ok(value) = value.to_str() {
                received.insert(name.as_str(), value);
            }
        }

        self.signer.verify(&received, body, signature)
    }
}

/// Picks the most useful message from an error response.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .or_else(|| Some(body.trim().to_string()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Paytrail API error")
                .to_string()
        })
}

#[async_trait]
impl PaymentGateway for PaytrailGateway {
    async fn list_payment_providers(&self) -> Result<Value, PaymentError> {
        self.execute(Method::GET, "/merchants/payment-providers", None)
            .await
    }

    async fn list_grouped_payment_providers(&self) -> Result<Value, PaymentError> {
        self.execute(Method::GET, "/merchants/grouped-payment-providers", None)
            .await
    }

    async fn create_payment(&self, request: CreatePaymentRequest) -> Result<Value, PaymentError> {
        let body = request.into_value();
        self.execute(Method::POST, "/payments", Some(&body)).await
    }
}
