//! OrderProjector - Projects a completed checkout session into a back-office order.

use std::sync::Arc;

use crate::domain::cart::{CompactCart, CompactItem};
use crate::domain::webhook::CheckoutSession;
use crate::ports::{Backoffice, NewOrder, OrderLineItem, OrderProperty};

/// Outcome of one projection attempt.
///
/// There is no error variant. Projection runs inside an
/// already-acknowledged webhook delivery, so failures are logged and
/// folded into the outcome instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionOutcome {
    /// A back-office order was created.
    OrderCreated { order_id: i64 },

    /// The session carried no decodable cart items; nothing to project.
    NoCartItems,

    /// A downstream call failed. Logged, not retried.
    Failed,
}

/// Projects completed checkout sessions into back-office orders.
///
/// The three back-office calls run sequentially: customer search,
/// customer create when the search comes up empty, order create.
/// Customer resolution is best-effort; an order without a customer link
/// beats no order at all.
pub struct OrderProjector {
    backoffice: Arc<dyn Backoffice>,
}

impl OrderProjector {
    pub fn new(backoffice: Arc<dyn Backoffice>) -> Self {
        Self { backoffice }
    }

    pub async fn project(&self, session: &CheckoutSession) -> ProjectionOutcome {
        // 1. Recover the cart from the session's metadata token.
        let compact = session.cart_token().and_then(CompactCart::decode);
        let Some(compact) = compact.filter(|cart| !cart.items.is_empty()) else {
            // Not every completed session carries a cart; a truncated
            // token also lands here. Acknowledge and move on.
            tracing::info!(
                session_id = %session.id,
                "completed session has no decodable cart items, skipping projection"
            );
            return ProjectionOutcome::NoCartItems;
        };

        // 2. Buyer email: the cart's copy wins, the session's own field
        //    is the fallback.
        let email = compact
            .email
            .clone()
            .or_else(|| session.customer_email.clone())
            .unwrap_or_default();

        // 3. Customer upsert. Search-then-create with no uniqueness
        //    guard: concurrent deliveries for the same new buyer can
        //    create two records.
        let customer_id = self.resolve_customer(&email).await;

        // 4. Create the order.
        let order = build_order(session, customer_id, email, &compact.items);
        match self.backoffice.create_order(order).await {
            Ok(created) => {
                tracing::info!(
                    session_id = %session.id,
                    order_id = created.id,
                    order_name = ?created.name,
                    "back-office order created"
                );
                ProjectionOutcome::OrderCreated { order_id: created.id }
            }
            Err(error) => {
                tracing::error!(
                    session_id = %session.id,
                    error = %error,
                    "order creation failed, event stays acknowledged without an order"
                );
                ProjectionOutcome::Failed
            }
        }
    }

    /// Resolve a back-office customer id for `email`.
    ///
    /// A failed search does not fall through to create; creating blind
    /// after a failed search risks duplicating an existing record.
    async fn resolve_customer(&self, email: &str) -> Option<i64> {
        if email.is_empty() {
            return None;
        }
        match self.backoffice.find_customer_by_email(email).await {
            Ok(Some(customer)) => Some(customer.id),
            Ok(None) => match self.backoffice.create_customer(email).await {
                Ok(customer) => Some(customer.id),
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        "customer creation failed, order will carry no customer link"
                    );
                    None
                }
            },
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "customer search failed, order will carry no customer link"
                );
                None
            }
        }
    }
}

fn build_order(
    session: &CheckoutSession,
    customer_id: Option<i64>,
    email: String,
    items: &[CompactItem],
) -> NewOrder {
    let payment_intent = session.payment_intent.as_deref().unwrap_or("n/a");
    NewOrder {
        customer_id,
        email,
        financial_status: "paid".to_string(),
        line_items: items.iter().map(order_line_item).collect(),
        note: format!(
            "Imported from hosted checkout session {} (payment intent {})",
            session.id, payment_intent
        ),
        note_attributes: vec![
            OrderProperty::new("checkout_session_id", &session.id),
            OrderProperty::new("payment_intent", payment_intent),
        ],
    }
}

fn order_line_item(item: &CompactItem) -> OrderLineItem {
    let options = item.options();

    let mut properties = vec![
        OrderProperty::new("part_number", &item.pn),
        OrderProperty::new("unit_price_cents", item.up.to_string()),
        OrderProperty::new(
            "options_json",
            serde_json::to_string(&options).unwrap_or_default(),
        ),
    ];
    // One flat opt_<code> property per pair, so back-office staff can
    // filter without parsing the JSON blob.
    for option in &options {
        properties.push(OrderProperty::new(
            format!("opt_{}", option.code),
            &option.value,
        ));
    }

    OrderLineItem {
        title: format!("{} ({})", item.n, item.pn),
        quantity: item.q,
        price: format_price(item.up),
        properties,
    }
}

/// Cents to a two-decimal price string: 4999 becomes "49.99".
fn format_price(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::shopify::MockBackoffice;
    use crate::domain::cart::{Cart, CartItem, ItemOption};
    use crate::ports::BackofficeError;
    use std::collections::HashMap;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn cart_item(name: &str, part_number: &str, cents: i64) -> CartItem {
        CartItem {
            product_name: name.to_string(),
            base_sku: None,
            part_number: part_number.to_string(),
            qty: 1,
            options: vec![ItemOption {
                code: "finish".to_string(),
                value: "black".to_string(),
            }],
            unit_price_cents: cents,
            currency: "USD".to_string(),
            notes: None,
        }
    }

    fn session_with_items(items: Vec<CartItem>) -> CheckoutSession {
        let cart = Cart::from_items(items).unwrap();
        let token = CompactCart::from_cart(&cart, Some("buyer@example.com")).encode();
        session_with_token(&token)
    }

    fn session_with_token(token: &str) -> CheckoutSession {
        let mut metadata = HashMap::new();
        metadata.insert("cart".to_string(), token.to_string());
        CheckoutSession {
            id: "cs_test_1".to_string(),
            payment_status: "paid".to_string(),
            customer_email: Some("session@example.com".to_string()),
            customer: None,
            payment_intent: Some("pi_test_1".to_string()),
            metadata,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Projection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creates_order_with_one_line_per_item() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![
            cart_item("Desk Lamp", "LAMP-BLK-40W", 4999),
            cart_item("Bulb", "BULB-E27", 450),
        ]);
        let outcome = projector.project(&session).await;

        assert!(matches!(outcome, ProjectionOutcome::OrderCreated { .. }));
        let orders = backoffice.created_orders();
        assert_eq!(orders.len(), 1);

        let order = &orders[0];
        assert_eq!(order.financial_status, "paid");
        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.line_items[0].title, "Desk Lamp (LAMP-BLK-40W)");
        assert_eq!(order.line_items[0].price, "49.99");
        assert_eq!(order.line_items[1].title, "Bulb (BULB-E27)");
        assert_eq!(order.line_items[1].price, "4.50");
    }

    #[tokio::test]
    async fn issues_one_customer_resolve_and_one_order_create() {
        let backoffice = Arc::new(MockBackoffice::new().with_customer(42, "buyer@example.com"));
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![
            cart_item("Desk Lamp", "LAMP-BLK-40W", 4999),
            cart_item("Bulb", "BULB-E27", 450),
        ]);
        projector.project(&session).await;

        assert_eq!(backoffice.find_customer_calls(), vec!["buyer@example.com".to_string()]);
        assert!(backoffice.create_customer_calls().is_empty());
        assert_eq!(backoffice.created_orders().len(), 1);
        assert_eq!(backoffice.created_orders()[0].customer_id, Some(42));
    }

    #[tokio::test]
    async fn creates_customer_when_search_comes_up_empty() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![cart_item("Desk Lamp", "LAMP-BLK-40W", 4999)]);
        projector.project(&session).await;

        assert_eq!(backoffice.create_customer_calls(), vec!["buyer@example.com".to_string()]);
        let order = backoffice.created_orders().remove(0);
        assert!(order.customer_id.is_some());
        assert_eq!(order.email, "buyer@example.com");
    }

    #[tokio::test]
    async fn falls_back_to_session_email_when_cart_has_none() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        let cart = Cart::from_items(vec![cart_item("Desk Lamp", "LAMP-BLK-40W", 4999)]).unwrap();
        let token = CompactCart::from_cart(&cart, None).encode();
        projector.project(&session_with_token(&token)).await;

        assert_eq!(
            backoffice.find_customer_calls(),
            vec!["session@example.com".to_string()]
        );
    }

    #[tokio::test]
    async fn line_properties_carry_part_number_price_and_options() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![cart_item("Desk Lamp", "LAMP-BLK-40W", 4999)]);
        projector.project(&session).await;

        let order = backoffice.created_orders().remove(0);
        let properties = &order.line_items[0].properties;

        let get = |name: &str| {
            properties
                .iter()
                .find(|p| p.name == name)
                .map(|p| p.value.clone())
        };
        assert_eq!(get("part_number").as_deref(), Some("LAMP-BLK-40W"));
        assert_eq!(get("unit_price_cents").as_deref(), Some("4999"));
        assert_eq!(get("opt_finish").as_deref(), Some("black"));
        assert!(get("options_json").unwrap().contains("\"finish\""));
    }

    #[tokio::test]
    async fn note_references_session_and_payment_intent() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![cart_item("Desk Lamp", "LAMP-BLK-40W", 4999)]);
        projector.project(&session).await;

        let order = backoffice.created_orders().remove(0);
        assert!(order.note.contains("cs_test_1"));
        assert!(order.note.contains("pi_test_1"));

        let attribute = |name: &str| {
            order
                .note_attributes
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.clone())
        };
        assert_eq!(attribute("checkout_session_id").as_deref(), Some("cs_test_1"));
        assert_eq!(attribute("payment_intent").as_deref(), Some("pi_test_1"));
    }

    #[tokio::test]
    async fn prices_always_use_two_decimals() {
        assert_eq!(format_price(4999), "49.99");
        assert_eq!(format_price(450), "4.50");
        assert_eq!(format_price(100), "1.00");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(99), "0.99");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // No-op and Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn session_without_metadata_is_a_no_op() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        let session = CheckoutSession {
            metadata: HashMap::new(),
            ..session_with_token("{}")
        };
        let outcome = projector.project(&session).await;

        assert_eq!(outcome, ProjectionOutcome::NoCartItems);
        assert!(backoffice.find_customer_calls().is_empty());
        assert!(backoffice.created_orders().is_empty());
    }

    #[tokio::test]
    async fn truncated_token_is_a_no_op() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        // A token cut mid-JSON no longer parses.
        let outcome = projector
            .project(&session_with_token(r#"{"email":"buyer@exam..."#))
            .await;

        assert_eq!(outcome, ProjectionOutcome::NoCartItems);
        assert!(backoffice.created_orders().is_empty());
    }

    #[tokio::test]
    async fn empty_item_list_is_a_no_op() {
        let backoffice = Arc::new(MockBackoffice::new());
        let projector = OrderProjector::new(backoffice.clone());

        let outcome = projector
            .project(&session_with_token(r#"{"email":"buyer@example.com","items":[]}"#))
            .await;

        assert_eq!(outcome, ProjectionOutcome::NoCartItems);
        assert!(backoffice.created_orders().is_empty());
    }

    #[tokio::test]
    async fn failed_customer_search_still_creates_the_order() {
        let backoffice = Arc::new(
            MockBackoffice::new()
                .failing_find_customer(BackofficeError::Network("timeout".to_string())),
        );
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![cart_item("Desk Lamp", "LAMP-BLK-40W", 4999)]);
        let outcome = projector.project(&session).await;

        assert!(matches!(outcome, ProjectionOutcome::OrderCreated { .. }));
        let order = backoffice.created_orders().remove(0);
        assert_eq!(order.customer_id, None);
        // No blind create after a failed search.
        assert!(backoffice.create_customer_calls().is_empty());
    }

    #[tokio::test]
    async fn failed_customer_create_still_creates_the_order() {
        let backoffice = Arc::new(MockBackoffice::new().failing_create_customer(
            BackofficeError::Api {
                status: 422,
                message: "email taken".to_string(),
            },
        ));
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![cart_item("Desk Lamp", "LAMP-BLK-40W", 4999)]);
        let outcome = projector.project(&session).await;

        assert!(matches!(outcome, ProjectionOutcome::OrderCreated { .. }));
        assert_eq!(backoffice.created_orders()[0].customer_id, None);
    }

    #[tokio::test]
    async fn failed_order_create_reports_failed_without_erroring() {
        let backoffice = Arc::new(
            MockBackoffice::new()
                .failing_create_order(BackofficeError::Network("timeout".to_string())),
        );
        let projector = OrderProjector::new(backoffice.clone());

        let session = session_with_items(vec![cart_item("Desk Lamp", "LAMP-BLK-40W", 4999)]);
        let outcome = projector.project(&session).await;

        assert_eq!(outcome, ProjectionOutcome::Failed);
    }
}
