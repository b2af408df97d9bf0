//! Klarna configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::paytrail::is_http_url;

/// Klarna credentials and defaults
///
/// Every credential is optional; endpoints that need a missing one answer
/// with a configuration error instead of failing startup.
#[derive(Debug, Clone, Deserialize)]
pub struct KlarnaSettings {
    /// API key for Basic auth
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client id handed to the web SDK
    pub websdk_client_id: Option<String>,

    /// Fallback public host for return URLs
    pub public_host: Option<String>,

    /// Currency for payment requests and checkout sessions
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl KlarnaSettings {
    /// API key, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().clone())
            .filter(|key| !key.is_empty())
    }

    /// Validate Klarna configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("KLARNA__BASE_URL"));
        }
        let currency = self.currency.as_str();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }
        Ok(())
    }
}

impl Default for KlarnaSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            websdk_client_id: None,
            public_host: None,
            currency: default_currency(),
        }
    }
}

fn default_base_url() -> String {
    "https://api-global.test.klarna.com".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = KlarnaSettings::default();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.base_url, "https://api-global.test.klarna.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_reads_as_none() {
        let config = KlarnaSettings {
            api_key: Some(SecretString::new(String::new())),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_validation_invalid_currency() {
        let config = KlarnaSettings {
            currency: "euro".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCurrency("euro".to_string()))
        );
    }

    #[test]
    fn test_validation_invalid_url() {
        let config = KlarnaSettings {
            base_url: "ftp://klarna".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
