//! # Payment Processor Client
//!
//! The API never handles card data. It asks the processor for a payment
//! intent sized to the booking's price and hands the intent's client secret
//! to the browser, which confirms the payment directly with the processor.
//! The resulting transaction id is later posted back to `/payments`.

use async_trait::async_trait;
use portal_core::errors::{PortalError, PortalResult};
use serde::Deserialize;
use tracing::{debug, error};

/// A payment intent created by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Creates an intent for `amount` in the processor's minor currency unit.
    async fn create_intent(&self, amount: i64) -> PortalResult<PaymentIntent>;
}

#[derive(Debug, Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: String,
}

/// Stripe payment intents over HTTPS.
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
    currency: String,
}

impl StripeClient {
    pub fn new(
        api_base: impl Into<String>,
        secret_key: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            currency: currency.into(),
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_intent(&self, amount: i64) -> PortalResult<PaymentIntent> {
        if amount <= 0 {
            return Err(PortalError::Validation(
                "payment amount must be positive".to_string(),
            ));
        }

        debug!(amount, currency = %self.currency, "Creating payment intent");

        let form = [
            ("amount", amount.to_string()),
            ("currency", self.currency.clone()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .http
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| PortalError::Payment(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "Payment processor rejected intent");
            return Err(PortalError::Payment(format!(
                "processor responded with {status}"
            )));
        }

        let intent: StripeIntent = response
            .json()
            .await
            .map_err(|e| PortalError::Payment(format!("unreadable response: {e}")))?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
