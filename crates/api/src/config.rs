//! # API Configuration Module
//!
//! Loads the portal API configuration from environment variables, with
//! defaults where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 5000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `ACCESS_TOKEN_SECRET`: secret used to sign access tokens (required)
//! - `ACCESS_TOKEN_TTL_SECONDS`: access token lifetime (default: 3600)
//! - `STRIPE_SECRET_KEY`: payment processor secret key (required)
//! - `STRIPE_API_BASE`: payment processor base URL (default: "https://api.stripe.com")
//! - `PAYMENT_CURRENCY`: currency for payment intents (default: "usd")
//! - `API_REQUEST_TIMEOUT_SECONDS`: request timeout (default: 30)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the portal API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use portal_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,
    /// `None` allows any origin
    pub cors_origins: Option<Vec<String>>,
    pub token_secret: String,
    pub token_ttl_seconds: i64,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub payment_currency: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL`, `ACCESS_TOKEN_SECRET` or
    /// `STRIPE_SECRET_KEY` is not set, or if `API_PORT` is not a valid port.
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .and_then(|origins| parse_origins(&origins));

        // Security settings
        let token_secret = env::var("ACCESS_TOKEN_SECRET")
            .wrap_err("ACCESS_TOKEN_SECRET environment variable must be set")?;
        let token_ttl_seconds = env::var("ACCESS_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|ttl| ttl.parse().ok())
            .filter(|ttl: &i64| *ttl > 0)
            .unwrap_or(3600);

        // Payment settings
        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")
            .wrap_err("STRIPE_SECRET_KEY environment variable must be set")?;
        let stripe_api_base =
            env::var("STRIPE_API_BASE").unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let payment_currency = env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string());

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            token_secret,
            token_ttl_seconds,
            stripe_secret_key,
            stripe_api_base,
            payment_currency,
            request_timeout,
        })
    }

    /// Returns the server address, e.g. "0.0.0.0:5000"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Unknown or empty values fall back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn parse_origins(value: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() { None } else { Some(origins) }
}
