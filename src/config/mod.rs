//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHECKOUT_GATEWAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use checkout_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod klarna;
mod paytrail;
mod server;

pub use error::{ConfigError, ValidationError};
pub use klarna::KlarnaSettings;
pub use paytrail::PaytrailSettings;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Paytrail merchant credentials
    #[serde(default)]
    pub paytrail: PaytrailSettings,

    /// Klarna credentials and defaults
    #[serde(default)]
    pub klarna: KlarnaSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHECKOUT_GATEWAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHECKOUT_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHECKOUT_GATEWAY__PAYTRAIL__MERCHANT_ID=375917` -> `paytrail.merchant_id = "375917"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing credentials are reported by [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHECKOUT_GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.paytrail.validate()?;
        self.klarna.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 9] = [
        "CHECKOUT_GATEWAY__PAYTRAIL__MERCHANT_ID",
        "CHECKOUT_GATEWAY__PAYTRAIL__SECRET_KEY",
        "CHECKOUT_GATEWAY__PAYTRAIL__API_URL",
        "CHECKOUT_GATEWAY__KLARNA__API_KEY",
        "CHECKOUT_GATEWAY__KLARNA__WEBSDK_CLIENT_ID",
        "CHECKOUT_GATEWAY__KLARNA__CURRENCY",
        "CHECKOUT_GATEWAY__SERVER__PORT",
        "CHECKOUT_GATEWAY__SERVER__ENVIRONMENT",
        "CHECKOUT_GATEWAY__SERVER__SESSION_TTL_SECS",
    ];

    fn set_minimal_env() {
        env::set_var("CHECKOUT_GATEWAY__PAYTRAIL__MERCHANT_ID", "375917");
        env::set_var("CHECKOUT_GATEWAY__PAYTRAIL__SECRET_KEY", "SAIPPUAKAUPPIAS");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.paytrail.merchant_id, "375917");
        assert_eq!(config.paytrail.secret_key.expose_secret(), "SAIPPUAKAUPPIAS");
        assert_eq!(config.paytrail.api_url, "https://services.paytrail.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_credentials_fail_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("PAYTRAIL__MERCHANT_ID"))
        );
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHECKOUT_GATEWAY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHECKOUT_GATEWAY__SERVER__PORT", "8080");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 8080);
    }

    #[test]
    fn test_custom_session_ttl() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHECKOUT_GATEWAY__SERVER__SESSION_TTL_SECS", "600");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.session_ttl(), std::time::Duration::from_secs(600));
    }

    #[test]
    fn test_klarna_settings() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHECKOUT_GATEWAY__KLARNA__API_KEY", "klarna_test_api_key");
        env::set_var("CHECKOUT_GATEWAY__KLARNA__WEBSDK_CLIENT_ID", "klarna_test_client");
        env::set_var("CHECKOUT_GATEWAY__KLARNA__CURRENCY", "SEK");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.klarna.api_key().as_deref(), Some("klarna_test_api_key"));
        assert_eq!(config.klarna.websdk_client_id.as_deref(), Some("klarna_test_client"));
        assert_eq!(config.klarna.currency, "SEK");
        assert!(config.validate().is_ok());
    }
}
