//! Payment gateway port for the Paytrail merchant API.
//!
//! The gateway proxies merchant-scoped API calls. Response bodies belong to
//! the vendor and are passed through as JSON rather than modelled here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields a payment creation request must carry with a truthy value.
pub const REQUIRED_PAYMENT_FIELDS: [&str; 7] = [
    "stamp",
    "reference",
    "amount",
    "currency",
    "items",
    "customer",
    "redirectUrls",
];

/// Port for the merchant payment API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Lists payment providers available to the merchant.
    async fn list_payment_providers(&self) -> Result<Value, PaymentError>;

    /// Lists payment providers grouped by type (bank, mobile, card, ...).
    async fn list_grouped_payment_providers(&self) -> Result<Value, PaymentError>;

    /// Creates a payment and returns the gateway's response.
    async fn create_payment(&self, request: CreatePaymentRequest) -> Result<Value, PaymentError>;
}

/// Open JSON payload for payment creation.
///
/// Only the presence of the required fields is checked locally; everything
/// else is validated by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatePaymentRequest(Map<String, Value>);

impl CreatePaymentRequest {
    /// Wraps a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a request from any JSON value; non-objects yield an empty request.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Returns a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Names of required fields that are absent or falsy, in declaration order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        REQUIRED_PAYMENT_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.get(field).map(is_truthy).unwrap_or(false))
            .collect()
    }

    /// The wire body.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Payment provider error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable error message.
    pub message: String,

    /// HTTP status returned by the provider, if a response was received.
    pub provider_status: Option<u16>,

    /// JSON body of the provider's error response, if it sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_status: None,
            details: None,
        }
    }

    /// Attach the provider's HTTP status.
    pub fn with_provider_status(mut self, status: u16) -> Self {
        self.provider_status = Some(status);
        self
    }

    /// Attach the provider's error body.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an error for a non-success provider response.
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            404 => PaymentErrorCode::NotFound,
            429 => PaymentErrorCode::RateLimitExceeded,
            _ => PaymentErrorCode::ProviderError,
        };
        Self::new(code, message).with_provider_status(status)
    }

    /// Create an error for a missing credential or setting.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ConfigurationError, message)
    }

    /// Create an error for a response that could not be understood.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Credentials or settings missing locally.
    ConfigurationError,

    /// Request could not be signed.
    SigningError,

    /// Provider answered with a body we could not use.
    InvalidResponse,

    /// Provider API error.
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ConfigurationError => "configuration_error",
            PaymentErrorCode::SigningError => "signing_error",
            PaymentErrorCode::InvalidResponse => "invalid_response",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
