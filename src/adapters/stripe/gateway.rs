//! Payment provider HTTP adapter.
//!
//! Implements [`PaymentGateway`] against the provider's REST API with
//! direct wire calls: form-encoded POST bodies (see [`super::form`]) and
//! bearer-token auth. No vendor SDK.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::PaymentConfig;
use crate::ports::{
    CheckoutSessionSpec, CreatedSession, GatewayError, PaymentGateway, SessionStatus,
};

use super::form;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for the payment gateway adapter.
#[derive(Debug, Clone)]
pub struct StripeGatewayConfig {
    /// Secret API key used as the bearer token.
    pub secret_key: SecretString,

    /// API base URL; pointable at a test double.
    pub api_base_url: String,
}

impl StripeGatewayConfig {
    /// Create a config with the default API base URL.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Build from the validated application payment section.
    pub fn from_app(config: &PaymentConfig) -> Self {
        Self::new(config.secret_key.clone()).with_base_url(config.api_base_url.clone())
    }
}

/// Payment gateway backed by the provider's checkout sessions API.
pub struct StripeGateway {
    config: StripeGatewayConfig,
    http_client: reqwest::Client,
}

impl StripeGateway {
    pub fn new(config: StripeGatewayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn sessions_url(&self) -> String {
        format!(
            "{}/v1/checkout/sessions",
            self.config.api_base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        spec: CheckoutSessionSpec,
    ) -> Result<CreatedSession, GatewayError> {
        let body = form::encode(&session_params(&spec));

        let response = self
            .http_client
            .post(self.sessions_url())
            .bearer_auth(self.config.secret_key.expose_secret())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error = %error_text,
                "Checkout session creation rejected by provider"
            );
            return Err(GatewayError::provider(format!(
                "Session creation failed with status {}",
                status
            )));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::invalid_response(e.to_string()))?;

        let url = session
            .url
            .ok_or_else(|| GatewayError::invalid_response("session response missing url"))?;

        Ok(CreatedSession {
            id: session.id,
            url,
        })
    }

    async fn get_checkout_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError> {
        let url = format!("{}/{}", self.sessions_url(), session_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::not_found(session_id));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error = %error_text,
                session_id,
                "Checkout session retrieval rejected by provider"
            );
            return Err(GatewayError::provider(format!(
                "Session retrieval failed with status {}",
                status
            )));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::invalid_response(e.to_string()))?;

        Ok(SessionStatus {
            id: session.id,
            payment_status: session.payment_status,
            payment_intent: session.payment_intent,
        })
    }
}

/// Build the nested session-creation payload.
///
/// Absent optionals become JSON nulls, which the form encoder omits
/// entirely; currency goes over the wire lowercase per the provider's
/// convention.
fn session_params(spec: &CheckoutSessionSpec) -> Value {
    let line_items: Vec<Value> = spec
        .line_items
        .iter()
        .map(|item| {
            json!({
                "quantity": item.quantity,
                "price_data": {
                    "currency": item.currency.to_lowercase(),
                    "unit_amount": item.unit_amount_cents,
                    "product_data": {
                        "name": item.name,
                        "description": item.description,
                    },
                },
            })
        })
        .collect();

    json!({
        "mode": spec.mode,
        "success_url": spec.success_url,
        "cancel_url": spec.cancel_url,
        "customer_email": spec.customer_email,
        "locale": spec.locale,
        "line_items": line_items,
        "metadata": { "cart": spec.cart_token },
    })
}

/// Checkout session fields this adapter reads back from the API.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    payment_status: String,
    #[serde(default)]
    payment_intent: Option<String>,
}
