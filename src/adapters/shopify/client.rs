//! Back-office REST client.
//!
//! Implements the [`Backoffice`] port against the store's admin API.
//! Every request authenticates with the private app access token passed
//! in the `X-Shopify-Access-Token` header.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::BackofficeConfig;
use crate::ports::{Backoffice, BackofficeError, CreatedOrder, CustomerRecord, NewOrder};

use super::types::{CustomerEnvelope, CustomerPayload, CustomersEnvelope, OrderEnvelope, OrderPayload};

/// Header carrying the admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Longest error-body excerpt kept in errors and logs.
const ERROR_BODY_MAX_CHARS: usize = 300;

/// Connection settings for the back-office admin API.
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Versioned API base, e.g. `https://shop.myshopify.com/admin/api/2024-01`.
    admin_api_base: String,
    access_token: SecretString,
}

impl ShopifyConfig {
    pub fn new(admin_api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            admin_api_base: admin_api_base.into(),
            access_token: SecretString::new(access_token.into()),
        }
    }

    /// Builds the client config from the application's back-office section.
    pub fn from_app(config: &BackofficeConfig) -> Self {
        Self::new(config.admin_api_base(), config.access_token.clone())
    }
}

/// HTTP implementation of the [`Backoffice`] port.
pub struct ShopifyBackoffice {
    config: ShopifyConfig,
    http_client: reqwest::Client,
}

impl ShopifyBackoffice {
    pub fn new(config: ShopifyConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.admin_api_base.trim_end_matches('/'), path)
    }

    /// Converts a non-success response into an [`BackofficeError::Api`],
    /// keeping a short excerpt of the body for diagnosis.
    async fn api_error(resource: &str, status: StatusCode, response: reqwest::Response) -> BackofficeError {
        let body = response.text().await.unwrap_or_default();
        let message: String = body.chars().take(ERROR_BODY_MAX_CHARS).collect();

        tracing::error!(
            resource = resource,
            status = status.as_u16(),
            error = %message,
            "back-office API request failed"
        );

        BackofficeError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl Backoffice for ShopifyBackoffice {
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<CustomerRecord>, BackofficeError> {
        let response = self
            .http_client
            .get(self.endpoint("customers/search.json"))
            .header(ACCESS_TOKEN_HEADER, self.config.access_token.expose_secret())
            .query(&[("query", format!("email:{email}"))])
            .send()
            .await
            .map_err(|e| BackofficeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error("customer search", status, response).await);
        }

        let envelope: CustomersEnvelope = response
            .json()
            .await
            .map_err(|e| BackofficeError::InvalidResponse(e.to_string()))?;

        Ok(envelope.customers.into_iter().next().map(|customer| CustomerRecord {
            id: customer.id,
            email: customer.email.unwrap_or_else(|| email.to_string()),
        }))
    }

    async fn create_customer(&self, email: &str) -> Result<CustomerRecord, BackofficeError> {
        let response = self
            .http_client
            .post(self.endpoint("customers.json"))
            .header(ACCESS_TOKEN_HEADER, self.config.access_token.expose_secret())
            .json(&CustomerPayload::with_email(email))
            .send()
            .await
            .map_err(|e| BackofficeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error("customer create", status, response).await);
        }

        let envelope: CustomerEnvelope = response
            .json()
            .await
            .map_err(|e| BackofficeError::InvalidResponse(e.to_string()))?;

        Ok(CustomerRecord {
            id: envelope.customer.id,
            email: envelope.customer.email.unwrap_or_else(|| email.to_string()),
        })
    }

    async fn create_order(&self, order: NewOrder) -> Result<CreatedOrder, BackofficeError> {
        let response = self
            .http_client
            .post(self.endpoint("orders.json"))
            .header(ACCESS_TOKEN_HEADER, self.config.access_token.expose_secret())
            .json(&OrderPayload::from(order))
            .send()
            .await
            .map_err(|e| BackofficeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error("order create", status, response).await);
        }

        let envelope: OrderEnvelope = response
            .json()
            .await
            .map_err(|e| BackofficeError::InvalidResponse(e.to_string()))?;

        Ok(CreatedOrder {
            id: envelope.order.id,
            name: envelope.order.name,
        })
    }
}
