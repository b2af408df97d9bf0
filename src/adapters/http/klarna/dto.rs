//! Request and response types for Klarna endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::checkout::coerce_amount;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/klarna/payment-request`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentRequestBody {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
}

impl CreatePaymentRequestBody {
    /// The requested amount, if it is a positive number.
    pub fn amount(&self) -> Option<i64> {
        self.amount.as_ref().map(coerce_amount).filter(|a| *a > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `GET /api/klarna/config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KlarnaConfigResponse {
    pub client_id: String,
}

/// Body of a successful `POST /api/klarna/payment-request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestResponse {
    pub payment_request_id: String,
}
