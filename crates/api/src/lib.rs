//! # Doctors Portal API
//!
//! The HTTP boundary of the clinic booking service: appointment availability,
//! bookings, access tokens, user roles, the doctor roster and payments.
//!
//! ## Architecture
//!
//! - **Routes**: define API endpoints and URL structure
//! - **Handlers**: parse requests, call the domain layer, shape responses
//! - **Middleware**: bearer-token authentication and error mapping
//! - **Payments**: client for the external payment processor
//! - **Config**: environment configuration
//!
//! Persistence is injected as an `Arc<dyn PortalStore>`, so the same router
//! runs against PostgreSQL in production and an in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Payment processor integration
pub mod payments;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    BoxError, Router,
};
use eyre::Result;
use portal_core::store::PortalStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{
    middleware::auth::TokenIssuer,
    payments::{PaymentProcessor, StripeClient},
};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState { store, tokens, payments });
/// let app = portal_api::router(state);
/// ```
pub struct ApiState {
    /// Persistence for options, bookings, users, doctors and payments
    pub store: Arc<dyn PortalStore>,
    /// Signs and verifies access tokens
    pub tokens: TokenIssuer,
    /// External payment processor
    pub payments: Arc<dyn PaymentProcessor>,
}

/// Builds the application router with every route attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Treatment catalog and availability
        .merge(routes::appointment::routes())
        // Patient bookings
        .merge(routes::booking::routes())
        // Users, roles and access tokens
        .merge(routes::user::routes())
        // Doctor roster
        .merge(routes::doctor::routes())
        // Payment intents and payment records
        .merge(routes::payment::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unhandled internal error: {err}"),
        )
    }
}

/// Starts the API server with the provided configuration and store
///
/// Installs the tracing subscriber, builds the token issuer and payment
/// client from `config`, and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn PortalStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let tokens = TokenIssuer::new(
        &config.token_secret,
        chrono::Duration::seconds(config.token_ttl_seconds),
    );
    let payments = Arc::new(StripeClient::new(
        &config.stripe_api_base,
        &config.stripe_secret_key,
        &config.payment_currency,
    ));

    let state = Arc::new(ApiState {
        store,
        tokens,
        payments,
    });

    let app = router(state)
        .layer(cors_layer(config.cors_origins.as_deref()))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(Duration::from_secs(config.request_timeout)),
        );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("doctors portal server is running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
