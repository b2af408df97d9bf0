//! Error responses shared by all HTTP endpoints.
//!
//! Every failure is returned as
//! `{ "error", "message", "status", "timestamp" }`, plus `missing` for
//! payment validation failures and `details` for the provider's error body
//! when a payment could not be created.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PaymentError, PaymentErrorCode, SessionStoreError};

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// An error that renders as an [`ErrorResponse`].
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                message: message.into(),
                status: status.as_u16(),
                missing: None,
                details: None,
                timestamp: Utc::now(),
            },
        }
    }

    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, message)
    }

    pub fn internal(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error, message)
    }

    /// 400 naming the required fields that were absent.
    pub fn missing_fields(missing: Vec<&str>) -> Self {
        let mut err = Self::bad_request(
            "Missing required fields",
            format!("Missing required fields: {}", missing.join(", ")),
        );
        err.body.missing = Some(missing.into_iter().map(str::to_string).collect());
        err
    }

    /// Wraps an upstream failure, relaying the provider's status when it
    /// is a valid error status.
    pub fn upstream(context: impl Into<String>, err: &PaymentError) -> Self {
        let status = match err.code {
            PaymentErrorCode::ConfigurationError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => err
                .provider_status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        Self::new(status, context, err.message.clone())
    }

    /// Attaches the provider's error body, when there is one.
    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.body.details = details;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let (status, error) = match err.code {
            ErrorCode::ValidationFailed => (StatusCode::BAD_REQUEST, "Validation failed"),
            ErrorCode::CheckoutSessionNotFound => {
                (StatusCode::NOT_FOUND, "Checkout session not found")
            }
        };
        Self::new(status, error, err.message)
    }
}

impl From<SessionStoreError> for ApiError {
    fn from(err: SessionStoreError) -> Self {
        DomainError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CheckoutSessionId;

    #[test]
    fn upstream_relays_provider_status() {
        let err = ApiError::upstream("Failed", &PaymentError::provider(401, "Unauthorized"));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.body().status, 401);
        assert_eq!(err.body().message, "Unauthorized");
    }

    #[test]
    fn upstream_without_status_is_internal() {
        let err = ApiError::upstream("Failed", &PaymentError::network("connection refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_success_status_is_not_relayed() {
        let err = ApiError::upstream(
            "Failed",
            &PaymentError::invalid_response("bad json").with_provider_status(200),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_fields_lists_names() {
        let err = ApiError::missing_fields(vec!["stamp", "items"]);
        let json = serde_json::to_value(err.body()).unwrap();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields");
        assert_eq!(json["missing"], serde_json::json!(["stamp", "items"]));
        assert_eq!(json["status"], 400);
    }

    #[test]
    fn unknown_session_is_not_found() {
        let err: ApiError = SessionStoreError::NotFound(CheckoutSessionId::new()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_error_is_bad_request() {
        let err: ApiError = DomainError::validation("name", "Field 'name' cannot be empty").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().error, "Validation failed");
    }

    #[test]
    fn missing_is_omitted_when_absent() {
        let json = serde_json::to_value(ApiError::internal("x", "y").body()).unwrap();
        assert!(json.get("missing").is_none());
        assert!(json.get("details").is_none());
    }

    #[test]
    fn details_carry_provider_body() {
        let upstream = PaymentError::provider(400, "Invalid amount")
            .with_details(serde_json::json!({ "status": "error", "message": "Invalid amount" }));
        let err = ApiError::upstream("Failed to create payment with Paytrail API", &upstream)
            .with_details(upstream.details.clone());
        let json = serde_json::to_value(err.body()).unwrap();

        assert_eq!(json["status"], 400);
        assert_eq!(json["details"]["status"], "error");
    }
}
