//! CreateCheckoutHandler - Command handler for opening a hosted checkout session.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::domain::cart::{Cart, CartItem, CompactCart};
use crate::ports::{CheckoutSessionSpec, PaymentGateway, SessionLineItem};

use super::error::CheckoutError;

/// Payment mode for one-time cart purchases.
const PAYMENT_MODE: &str = "payment";

/// Command to open a hosted checkout session for a configured cart.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub customer_email: Option<String>,
    pub items: Vec<CartItem>,
    pub locale: Option<String>,
}

/// Result of a successfully opened session.
#[derive(Debug, Clone)]
pub struct CreatedCheckout {
    pub session_id: String,
    pub url: String,
}

/// Handler for opening hosted checkout sessions.
///
/// Validates the cart, consolidates duplicate configurations, attaches
/// the compact cart token as session metadata, and hands the buyer off
/// to the provider's hosted page.
pub struct CreateCheckoutHandler {
    gateway: Arc<dyn PaymentGateway>,
    site: SiteConfig,
}

impl CreateCheckoutHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, site: SiteConfig) -> Self {
        Self { gateway, site }
    }

    pub async fn handle(&self, cmd: CreateCheckoutCommand) -> Result<CreatedCheckout, CheckoutError> {
        // 1. Validate the buyer email.
        let email = normalize_email(cmd.customer_email.as_deref())?;

        // 2. Validate and consolidate the cart.
        let cart = Cart::from_items(cmd.items)?;

        // 3. Compact the cart into the session's metadata token. The
        //    token is the only cart state that survives to the webhook.
        let cart_token = CompactCart::from_cart(&cart, Some(&email)).encode();

        // 4. One provider line item per consolidated cart line.
        let line_items = cart.items().iter().map(session_line_item).collect();

        let created = self
            .gateway
            .create_checkout_session(CheckoutSessionSpec {
                mode: PAYMENT_MODE.to_string(),
                customer_email: Some(email),
                locale: cmd.locale,
                success_url: self.site.checkout_success_url(),
                cancel_url: self.site.checkout_cancel_url(),
                line_items,
                cart_token,
            })
            .await?;

        tracing::info!(
            session_id = %created.id,
            item_count = cart.items().len(),
            total_cents = cart.total_cents(),
            "checkout session created"
        );

        Ok(CreatedCheckout {
            session_id: created.id,
            url: created.url,
        })
    }
}

fn normalize_email(raw: Option<&str>) -> Result<String, CheckoutError> {
    let email = raw.map(str::trim).unwrap_or_default();
    if email.is_empty() || !email.contains('@') {
        return Err(CheckoutError::InvalidEmail);
    }
    Ok(email.to_string())
}

fn session_line_item(item: &CartItem) -> SessionLineItem {
    SessionLineItem {
        name: item.product_name.clone(),
        description: Some(item.description()),
        unit_amount_cents: item.unit_price_cents,
        currency: item.currency.clone(),
        quantity: item.qty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentGateway;
    use crate::domain::cart::{CartError, ItemOption};
    use crate::ports::GatewayError;

    fn site() -> SiteConfig {
        SiteConfig {
            public_base_url: "https://shop.example.com".to_string(),
        }
    }

    fn lamp_item() -> CartItem {
        CartItem {
            product_name: "Desk Lamp".to_string(),
            base_sku: Some("LAMP".to_string()),
            part_number: "LAMP-BLK-40W".to_string(),
            qty: 2,
            options: vec![ItemOption {
                code: "finish".to_string(),
                value: "black".to_string(),
            }],
            unit_price_cents: 4999,
            currency: "USD".to_string(),
            notes: None,
        }
    }

    fn command() -> CreateCheckoutCommand {
        CreateCheckoutCommand {
            customer_email: Some("buyer@example.com".to_string()),
            items: vec![lamp_item()],
            locale: None,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn returns_session_id_and_url() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway, site());

        let created = handler.handle(command()).await.unwrap();
        assert_eq!(created.session_id, "cs_test_mock");
        assert!(created.url.starts_with("https://"));
    }

    #[tokio::test]
    async fn builds_spec_from_cart_and_site() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway.clone(), site());

        handler.handle(command()).await.unwrap();

        let calls = gateway.create_calls();
        assert_eq!(calls.len(), 1);
        let spec = &calls[0];

        assert_eq!(spec.mode, "payment");
        assert_eq!(spec.customer_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(
            spec.success_url,
            "https://shop.example.com/checkout/success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(spec.cancel_url, "https://shop.example.com/checkout/cancel");
        assert_eq!(spec.line_items.len(), 1);
        assert_eq!(spec.line_items[0].name, "Desk Lamp");
        assert_eq!(spec.line_items[0].unit_amount_cents, 4999);
        assert_eq!(spec.line_items[0].quantity, 2);
    }

    #[tokio::test]
    async fn attaches_decodable_cart_token() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway.clone(), site());

        handler.handle(command()).await.unwrap();

        let spec = gateway.create_calls().remove(0);
        let compact = CompactCart::decode(&spec.cart_token).unwrap();
        assert_eq!(compact.email.as_deref(), Some("buyer@example.com"));
        assert_eq!(compact.items.len(), 1);
        assert_eq!(compact.items[0].pn, "LAMP-BLK-40W");
        assert_eq!(compact.items[0].up, 4999);
    }

    #[tokio::test]
    async fn merges_same_configuration_before_creating_lines() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway.clone(), site());

        let cmd = CreateCheckoutCommand {
            items: vec![lamp_item(), lamp_item()],
            ..command()
        };
        handler.handle(cmd).await.unwrap();

        let spec = gateway.create_calls().remove(0);
        assert_eq!(spec.line_items.len(), 1);
        assert_eq!(spec.line_items[0].quantity, 4);
    }

    #[tokio::test]
    async fn trims_the_email() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway.clone(), site());

        let cmd = CreateCheckoutCommand {
            customer_email: Some("  buyer@example.com  ".to_string()),
            ..command()
        };
        handler.handle(cmd).await.unwrap();

        let spec = gateway.create_calls().remove(0);
        assert_eq!(spec.customer_email.as_deref(), Some("buyer@example.com"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn rejects_missing_email() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway.clone(), site());

        let cmd = CreateCheckoutCommand {
            customer_email: None,
            ..command()
        };
        let result = handler.handle(cmd).await;

        assert_eq!(result.unwrap_err(), CheckoutError::InvalidEmail);
        assert!(gateway.create_calls().is_empty());
    }

    #[tokio::test]
    async fn rejects_email_without_at_sign() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway, site());

        let cmd = CreateCheckoutCommand {
            customer_email: Some("not-an-email".to_string()),
            ..command()
        };
        assert_eq!(
            handler.handle(cmd).await.unwrap_err(),
            CheckoutError::InvalidEmail
        );
    }

    #[tokio::test]
    async fn rejects_invalid_cart_before_calling_the_gateway() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway.clone(), site());

        let cmd = CreateCheckoutCommand {
            items: vec![CartItem {
                qty: 0,
                ..lamp_item()
            }],
            ..command()
        };
        let result = handler.handle(cmd).await;

        assert_eq!(
            result.unwrap_err(),
            CheckoutError::Validation(CartError::InvalidQuantity)
        );
        assert!(gateway.create_calls().is_empty());
    }

    #[tokio::test]
    async fn rejects_empty_cart() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = CreateCheckoutHandler::new(gateway, site());

        let cmd = CreateCheckoutCommand {
            items: vec![],
            ..command()
        };
        assert_eq!(
            handler.handle(cmd).await.unwrap_err(),
            CheckoutError::Validation(CartError::Empty)
        );
    }

    #[tokio::test]
    async fn propagates_gateway_failures() {
        let gateway = Arc::new(
            MockPaymentGateway::new().failing_create(GatewayError::network("connect timeout")),
        );
        let handler = CreateCheckoutHandler::new(gateway, site());

        let result = handler.handle(command()).await;
        assert!(matches!(result, Err(CheckoutError::Gateway(_))));
    }
}
