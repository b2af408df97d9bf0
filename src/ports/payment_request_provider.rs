//! Port for creating widget payment requests with Klarna.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::payment_gateway::PaymentError;

/// Default request amount in minor units when the caller supplies none.
pub const DEFAULT_PAYMENT_REQUEST_AMOUNT: i64 = 1590;

/// Creates payment requests that the web SDK later completes.
#[async_trait]
pub trait PaymentRequestProvider: Send + Sync {
    /// Creates a payment request.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` when credentials are missing, otherwise the
    /// provider's status and message.
    async fn create_payment_request(
        &self,
        command: CreatePaymentRequestCommand,
    ) -> Result<PaymentRequestCreated, PaymentError>;
}

/// Input for a new payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentRequestCommand {
    /// ISO 4217 code; the provider's configured default when absent.
    pub currency: Option<String>,
    /// Amount in minor units; [`DEFAULT_PAYMENT_REQUEST_AMOUNT`] when absent.
    pub amount: Option<i64>,
    /// Where the customer returns after completing the request.
    pub return_url: String,
}

/// A created payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequestCreated {
    pub payment_request_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_request_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentRequestProvider) {}
    }
}
