//! Checkout Gateway server.
//!
//! Serves the signed Paytrail proxy, the Klarna web SDK endpoints and the
//! per-session shipping callbacks for the payment widget.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CHECKOUT_GATEWAY__SERVER__PORT` | `3000` | Listen port |
//! | `CHECKOUT_GATEWAY__SERVER__SESSION_TTL_SECS` | `1800` | Idle checkout session lifetime |
//! | `CHECKOUT_GATEWAY__PAYTRAIL__MERCHANT_ID` | *(required)* | Merchant account id |
//! | `CHECKOUT_GATEWAY__PAYTRAIL__SECRET_KEY` | *(required)* | Merchant secret key |
//! | `CHECKOUT_GATEWAY__KLARNA__API_KEY` | *(unset)* | Klarna API key |
//! | `CHECKOUT_GATEWAY__KLARNA__WEBSDK_CLIENT_ID` | *(unset)* | Klarna web SDK client id |
//! | `RUST_LOG` | *(unset)* | Tracing filter (overrides `SERVER__LOG_LEVEL`) |

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use checkout_gateway::adapters::http::{
    api_router, CheckoutAppState, KlarnaAppState, PaymentsAppState,
};
use checkout_gateway::adapters::{
    InMemoryCheckoutSessions, KlarnaConfig, KlarnaPaymentRequestAdapter, PaytrailConfig,
    PaytrailGateway, SystemClock, UuidNonceSource,
};
use checkout_gateway::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use checkout_gateway::domain::signing::SigningError;
use secrecy::ExposeSecret;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid Paytrail credentials: {0}")]
    Signing(#[from] SigningError),

    #[error("Invalid log filter: {0}")]
    LogFilter(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the configured log level.
/// Production emits JSON lines.
fn init_tracing(log_level: &str, json: bool) -> Result<(), StartupError> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level).map_err(|e| StartupError::LogFilter(e.to_string()))?
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

fn build_app(config: &AppConfig) -> Result<Router, StartupError> {
    let timeout = config.server.request_timeout();

    let paytrail = PaytrailGateway::new(
        PaytrailConfig::new(
            config.paytrail.merchant_id.clone(),
            config.paytrail.secret_key.expose_secret().clone(),
        )
        .with_api_url(config.paytrail.api_url.clone())
        .with_timeout(timeout),
        Arc::new(SystemClock),
        Arc::new(UuidNonceSource),
    )?;

    let klarna = KlarnaPaymentRequestAdapter::new(
        KlarnaConfig::new(config.klarna.api_key())
            .with_base_url(config.klarna.base_url.clone())
            .with_default_currency(config.klarna.currency.clone())
            .with_timeout(timeout),
        Arc::new(UuidNonceSource),
    );
    if config.klarna.api_key().is_none() {
        warn!("Klarna API key not configured; payment requests will fail");
    }

    let payments_state = PaymentsAppState {
        gateway: Arc::new(paytrail),
    };
    let klarna_state = KlarnaAppState {
        provider: Arc::new(klarna),
        websdk_client_id: config.klarna.websdk_client_id.clone(),
        public_host: config.klarna.public_host.clone(),
    };
    let checkout_state = CheckoutAppState {
        sessions: Arc::new(InMemoryCheckoutSessions::with_ttl(config.server.session_ttl())),
        currency: config.klarna.currency.clone(),
        public_host: config.klarna.public_host.clone(),
    };

    Ok(api_router(payments_state, klarna_state, checkout_state)
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Received shutdown signal");
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.is_production())?;
    config.validate()?;

    let addr = config.server.socket_addr()?;
    let app = build_app(&config)?;

    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        merchant_id = %config.paytrail.merchant_id,
        version = env!("CARGO_PKG_VERSION"),
        "Checkout gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed yet
        eprintln!("checkout-gateway failed to start: {e}");
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}
