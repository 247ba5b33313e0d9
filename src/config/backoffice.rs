//! Back-office store configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Back-office store configuration (Shopify-compatible admin API)
#[derive(Debug, Clone, Deserialize)]
pub struct BackofficeConfig {
    /// Store domain, e.g. `my-shop.myshopify.com` (no scheme)
    pub store_domain: String,

    /// Static admin API access token
    pub access_token: String,

    /// Admin API version segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Full base URL override (test doubles); derived from the domain when unset
    pub api_base_url: Option<String>,
}

impl BackofficeConfig {
    /// Base URL for admin API requests, e.g.
    /// `https://my-shop.myshopify.com/admin/api/2024-01`
    pub fn admin_api_base(&self) -> String {
        let origin = match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.store_domain),
        };
        format!("{}/admin/api/{}", origin, self.api_version)
    }

    /// Validate back-office configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.store_domain.is_empty() {
            return Err(ValidationError::MissingRequired("BACKOFFICE_STORE_DOMAIN"));
        }
        if self.store_domain.contains("://") {
            return Err(ValidationError::InvalidStoreDomain);
        }
        if self.access_token.is_empty() {
            return Err(ValidationError::MissingRequired("BACKOFFICE_ACCESS_TOKEN"));
        }
        if self.api_version.is_empty() {
            return Err(ValidationError::MissingRequired("BACKOFFICE_API_VERSION"));
        }
        Ok(())
    }
}

impl Default for BackofficeConfig {
    fn default() -> Self {
        Self {
            store_domain: String::new(),
            access_token: String::new(),
            api_version: default_api_version(),
            api_base_url: None,
        }
    }
}

fn default_api_version() -> String {
    "2024-01".to_string()
}
