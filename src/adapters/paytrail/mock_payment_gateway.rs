//! Mock payment gateway for testing.
//!
//! Provides a configurable mock implementation of `PaymentGateway` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ports::{CreatePaymentRequest, PaymentError, PaymentGateway};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
/// mock.set_payment_response(json!({ "transactionId": "abc" }));
/// mock.set_method_error("create_payment", PaymentError::provider(422, "Invalid amount"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Response for `list_payment_providers`.
    providers: Option<Value>,

    /// Response for `list_grouped_payment_providers`.
    grouped_providers: Option<Value>,

    /// Response for `create_payment`.
    payment: Option<Value>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub body: Option<Value>,
}

impl MockPaymentGateway {
    /// Create a new mock gateway with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the response for `list_payment_providers`.
    pub fn set_providers_response(&self, response: Value) {
        self.state().providers = Some(response);
    }

    /// Set the response for `list_grouped_payment_providers`.
    pub fn set_grouped_providers_response(&self, response: Value) {
        self.state().grouped_providers = Some(response);
    }

    /// Set the response for `create_payment`.
    pub fn set_payment_response(&self, response: Value) {
        self.state().payment = Some(response);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self, method: &str, body: Option<Value>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            body,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.state();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Global error is consumed
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn list_payment_providers(&self) -> Result<Value, PaymentError> {
        self.record_call("list_payment_providers", None);
        self.check_error("list_payment_providers")?;

        Ok(self.state().providers.clone().unwrap_or_else(|| {
            json!([{ "id": "osuuspankki", "name": "OP", "group": "bank" }])
        }))
    }

    async fn list_grouped_payment_providers(&self) -> Result<Value, PaymentError> {
        self.record_call("list_grouped_payment_providers", None);
        self.check_error("list_grouped_payment_providers")?;

        Ok(self.state().grouped_providers.clone().unwrap_or_else(|| {
            json!({ "groups": [{ "id": "bank", "name": "Bank payment", "providers": [] }], "providers": [] })
        }))
    }

    async fn create_payment(&self, request: CreatePaymentRequest) -> Result<Value, PaymentError> {
        let body = request.into_value();
        let stamp = body.get("stamp").cloned().unwrap_or(Value::Null);
        self.record_call("create_payment", Some(body));
        self.check_error("create_payment")?;

        Ok(self.state().payment.clone().unwrap_or_else(|| {
            json!({
                "transactionId": "mock-transaction",
                "href": "https://pay.paytrail.com/pay/mock-transaction",
                "reference": stamp,
                "providers": []
            })
        }))
    }
}
