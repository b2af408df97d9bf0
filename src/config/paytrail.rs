//! Paytrail configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Paytrail merchant credentials and endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PaytrailSettings {
    /// Merchant account id
    #[serde(default)]
    pub merchant_id: String,

    /// Merchant secret key (HMAC key)
    #[serde(default = "empty_secret")]
    pub secret_key: SecretString,

    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl PaytrailSettings {
    /// Validate Paytrail configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYTRAIL__MERCHANT_ID"));
        }
        if self.secret_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYTRAIL__SECRET_KEY"));
        }
        if !is_http_url(&self.api_url) {
            return Err(ValidationError::InvalidUrl("PAYTRAIL__API_URL"));
        }
        Ok(())
    }
}

impl Default for PaytrailSettings {
    fn default() -> Self {
        Self {
            merchant_id: String::new(),
            secret_key: empty_secret(),
            api_url: default_api_url(),
        }
    }
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_api_url() -> String {
    "https://services.paytrail.com".to_string()
}
