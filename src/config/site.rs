//! Storefront site configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Storefront site configuration
///
/// The site is the public-facing shop the customer returns to after a
/// hosted checkout, so the base URL must be reachable from a browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Public base URL of the storefront (no trailing slash)
    pub public_base_url: String,
}

impl SiteConfig {
    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }

    /// URL the provider redirects to after a completed checkout
    pub fn checkout_success_url(&self) -> String {
        format!(
            "{}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}",
            self.base_url()
        )
    }

    /// URL the provider redirects to when the customer abandons checkout
    pub fn checkout_cancel_url(&self) -> String {
        format!("{}/checkout/cancel", self.base_url())
    }

    /// Validate site configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.public_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SITE_PUBLIC_BASE_URL"));
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidPublicBaseUrl);
        }
        Ok(())
    }
}
